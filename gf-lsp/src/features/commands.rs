use serde::Deserialize;
use serde_json::Value;
use tower_lsp::jsonrpc::{Error, Result};
use tower_lsp::lsp_types::{Position, Url};

pub const COMMAND_OPEN_UNDER_CURSOR: &str = "gf.openUnderCursor";

/// Every command the server advertises.
pub const COMMANDS: [&str; 1] = [COMMAND_OPEN_UNDER_CURSOR];

/// Arguments of `gf.openUnderCursor`, sent as the first command argument.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenUnderCursorArgs {
    pub uri: Url,
    pub position: Position,
    #[serde(default)]
    pub selection: Option<String>,
}

pub fn parse_open_args(arguments: &[Value]) -> Result<OpenUnderCursorArgs> {
    let first = arguments
        .first()
        .cloned()
        .ok_or_else(|| Error::invalid_params("expected { uri, position, selection? }"))?;
    serde_json::from_value(first).map_err(|err| Error::invalid_params(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tower_lsp::jsonrpc::ErrorCode;

    #[test]
    fn parses_arguments_with_and_without_selection() {
        let args = parse_open_args(&[json!({
            "uri": "file:///tmp/doc.txt",
            "position": { "line": 2, "character": 5 },
        })])
        .unwrap();
        assert_eq!(args.position, Position::new(2, 5));
        assert_eq!(args.selection, None);

        let args = parse_open_args(&[json!({
            "uri": "file:///tmp/doc.txt",
            "position": { "line": 0, "character": 0 },
            "selection": "a b.txt",
        })])
        .unwrap();
        assert_eq!(args.selection.as_deref(), Some("a b.txt"));
    }

    #[test]
    fn rejects_missing_or_malformed_arguments() {
        let err = parse_open_args(&[]).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidParams);

        let err = parse_open_args(&[json!({ "uri": 3 })]).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidParams);
    }
}
