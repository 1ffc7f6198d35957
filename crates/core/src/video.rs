/// Extract the video id from a watch URL.
///
/// Takes whatever follows the last `v=` and cuts it at the next `&`. There is
/// no validation: a URL without `v=` yields its whole text up to the first `&`.
pub fn extract_video_id(url: &str) -> &str {
    let tail = url.rsplit("v=").next().unwrap_or(url);
    tail.split('&').next().unwrap_or(tail)
}
