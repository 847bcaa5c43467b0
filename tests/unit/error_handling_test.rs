#[cfg(test)]
mod tests {
    use crate::error::{DrillError, ErrorStage};

    #[test]
    fn test_error_creation() {
        let error = DrillError::new("Test error", ErrorStage::Load);
        assert_eq!(error.message, "Test error");
        assert_eq!(error.stage, ErrorStage::Load);
    }

    #[test]
    fn test_error_with_context() {
        let error = DrillError::persistence("Test error")
            .with_context("Additional context");
        assert_eq!(error.stage, ErrorStage::Persistence);
        assert_eq!(error.context.as_deref(), Some("Additional context"));
    }

    #[test]
    fn test_error_display() {
        let error = DrillError::scaffold("Test error")
            .with_context("context")
            .with_source("std::io");
        let display = format!("{}", error);
        assert!(display.starts_with("[scaffold] Test error"));
        assert!(display.contains("(context: context)"));
        assert!(display.contains("(source: std::io)"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error: DrillError = io.into();
        assert_eq!(error.stage, ErrorStage::Io);
        assert!(error.message.contains("denied"));
    }

    #[test]
    fn test_yaml_error_is_load_stage() {
        let err = serde_yaml::from_str::<serde_yaml::Value>("a: [1, 2").unwrap_err();
        let error: DrillError = err.into();
        assert_eq!(error.stage, ErrorStage::Load);
        assert_eq!(error.source.as_deref(), Some("serde_yaml"));
    }

    #[test]
    fn test_json_error_is_persistence_stage() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: DrillError = err.into();
        assert_eq!(error.stage, ErrorStage::Persistence);
        assert_eq!(error.source.as_deref(), Some("serde_json"));
    }
}
