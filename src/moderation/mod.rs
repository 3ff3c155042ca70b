// Video flagging - placeholder, the entry points exist but change nothing

use thiserror::Error;
use tracing::warn;

/// Returned by operations that are deliberately not implemented yet
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{operation} needs implementation")]
pub struct Unimplemented {
    pub operation: &'static str,
}

/// Mark a video as flagged
pub fn flag_video(video_id: &str, reason: Option<&str>) -> Result<(), Unimplemented> {
    warn!("flag_video called for '{}' (reason: {:?}) - not implemented", video_id, reason);
    Err(Unimplemented { operation: "flag_video" })
}

/// Remove a flag from a video
pub fn allow_video(video_id: &str) -> Result<(), Unimplemented> {
    warn!("allow_video called for '{}' - not implemented", video_id);
    Err(Unimplemented { operation: "allow_video" })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stubs_report_unimplemented() {
        let err = flag_video("v1", Some("spam")).unwrap_err();
        assert_eq!(err.to_string(), "flag_video needs implementation");

        let err = allow_video("v1").unwrap_err();
        assert_eq!(err, Unimplemented { operation: "allow_video" });
        assert_eq!(err.to_string(), "allow_video needs implementation");
    }
}
