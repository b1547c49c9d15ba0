//! Result items in the shape the launcher host renders

use crate::command::{usage_text, Roll, USAGE_TITLE};
use serde::{Deserialize, Serialize};

pub const ICON_PATH: &str = "icon.png";

/// Host API method that copies its first parameter to the clipboard
pub const COPY_TO_CLIPBOARD: &str = "Flow.Launcher.CopyToClipboard";

/// Action the host runs when the user selects a result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcAction {
    pub method: String,
    pub parameters: Vec<serde_json::Value>,
}

impl RpcAction {
    pub fn copy_to_clipboard(text: &str) -> Self {
        Self {
            method: COPY_TO_CLIPBOARD.to_string(),
            // text, direct copy, show notification
            parameters: vec![text.into(), false.into(), true.into()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultItem {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "SubTitle")]
    pub subtitle: String,
    #[serde(rename = "IcoPath")]
    pub icon_path: String,
    #[serde(rename = "JsonRPCAction", default, skip_serializing_if = "Option::is_none")]
    pub action: Option<RpcAction>,
}

impl ResultItem {
    /// Item whose selection copies the title
    pub fn copyable(title: String, subtitle: String) -> Self {
        let action = RpcAction::copy_to_clipboard(&title);
        Self {
            title,
            subtitle,
            icon_path: ICON_PATH.to_string(),
            action: Some(action),
        }
    }

    pub fn informational(title: String, subtitle: String) -> Self {
        Self {
            title,
            subtitle,
            icon_path: ICON_PATH.to_string(),
            action: None,
        }
    }
}

impl From<&Roll> for ResultItem {
    fn from(roll: &Roll) -> Self {
        match roll {
            Roll::Answer { label, .. } => {
                ResultItem::copyable(label.clone(), "Random yes/no answer".to_string())
            }
            Roll::Number { value, start, end } => ResultItem::copyable(
                value.to_string(),
                format!("Random number between {} and {}", start, end),
            ),
            Roll::Pick { label, choices } => ResultItem::copyable(
                label.clone(),
                format!("Random pick from {} labels", choices),
            ),
            Roll::Usage(err) => {
                ResultItem::informational(USAGE_TITLE.to_string(), usage_text(Some(err)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::RollError;
    use serde_json::json;

    #[test]
    fn test_number_item_json() {
        let item = ResultItem::from(&Roll::Number {
            value: 4,
            start: 1,
            end: 6,
        });
        let value = serde_json::to_value(&item).unwrap();

        assert_eq!(
            value,
            json!({
                "Title": "4",
                "SubTitle": "Random number between 1 and 6",
                "IcoPath": "icon.png",
                "JsonRPCAction": {
                    "method": "Flow.Launcher.CopyToClipboard",
                    "parameters": ["4", false, true]
                }
            })
        );
    }

    #[test]
    fn test_pick_item_subtitle() {
        let item = ResultItem::from(&Roll::Pick {
            label: "Katie".into(),
            choices: 4,
        });
        assert_eq!(item.title, "Katie");
        assert_eq!(item.subtitle, "Random pick from 4 labels");
    }

    #[test]
    fn test_usage_item_has_no_action() {
        let item = ResultItem::from(&Roll::Usage(RollError::TooManyArguments));
        assert_eq!(item.title, "Random Roll Usage");
        assert!(item.subtitle.starts_with("Too many arguments."));
        assert!(item.action.is_none());

        let value = serde_json::to_value(&item).unwrap();
        assert!(value.get("JsonRPCAction").is_none());
    }
}
