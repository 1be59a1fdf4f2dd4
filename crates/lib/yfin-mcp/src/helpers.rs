use std::borrow::Cow;

use rmcp::ErrorData;
use rmcp::model::{CallToolResult, Content, ErrorCode};
use tracing::error;
use yfin_core::control::ControlError;

pub(crate) fn mcp_err(code: ErrorCode, message: impl Into<Cow<'static, str>>) -> ErrorData {
    ErrorData {
        code,
        message: message.into(),
        data: None,
    }
}

pub(crate) fn map_err(err: ControlError) -> ErrorData {
    let code = match &err {
        ControlError::UnknownTool(_) => ErrorCode::METHOD_NOT_FOUND,
        ControlError::InvalidArguments { .. } => ErrorCode::INVALID_PARAMS,
        ControlError::Provider(_) | ControlError::Serialize(_) => ErrorCode::INTERNAL_ERROR,
    };
    error!(error = %err, "tool call failed");
    mcp_err(code, err.to_string())
}

pub(crate) fn text_result(text: String) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text)])
}

#[cfg(test)]
mod tests {
    use yfin_core::provider::ProviderError;

    use super::*;

    #[test]
    fn provider_failures_are_internal_errors() {
        let err = map_err(ControlError::Provider(ProviderError::Transport(
            "connection reset".to_string(),
        )));
        assert_eq!(err.code, ErrorCode::INTERNAL_ERROR);
        assert_eq!(err.message, "provider transport error: connection reset");
    }

    #[test]
    fn bad_arguments_are_invalid_params() {
        let err = map_err(ControlError::InvalidArguments {
            tool: "get_top",
            message: "unknown variant `crypto`".to_string(),
        });
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
        assert!(err.message.starts_with("invalid arguments for get_top"));
    }
}
