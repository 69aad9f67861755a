use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Which edge of the host page the console container is anchored to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Position {
    Top,
    #[default]
    Bottom,
}

impl Position {
    /// Parses a position case-insensitively. Anything other than `top` is `Bottom`.
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("top") {
            Self::Top
        } else {
            Self::Bottom
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
        }
    }
}

impl Serialize for Position {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Position {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

/// Allowed entry types, either as a list or a comma-separated string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Filters {
    List(Vec<String>),
    Csv(String),
}

impl Filters {
    /// Normalized type names. Blank items are dropped, so `""` means "no filter".
    pub fn values(&self) -> Vec<String> {
        let items: Vec<&str> = match self {
            Self::List(list) => list.iter().map(String::as_str).collect(),
            Self::Csv(csv) => csv.split(',').collect(),
        };
        items
            .into_iter()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
            .collect()
    }
}

impl From<Vec<String>> for Filters {
    fn from(list: Vec<String>) -> Self {
        Self::List(list)
    }
}

impl From<&[&str]> for Filters {
    fn from(list: &[&str]) -> Self {
        Self::List(list.iter().map(|s| (*s).to_owned()).collect())
    }
}

/// Payload of `device:pluginControl`. Absent fields leave the current policy unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlPatch {
    /// Wipes the visible list only; every other field is ignored when set.
    #[serde(default, skip_serializing_if = "is_false")]
    pub clear: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paused: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<Filters>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<usize>,
    /// Search text. Absent leaves search alone; `null` or `""` disables it.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub search: Option<Option<String>>,
}

impl ControlPatch {
    /// A patch that only clears the visible list.
    pub fn clear() -> Self {
        Self {
            clear: true,
            ..Self::default()
        }
    }

    pub fn paused(paused: bool) -> Self {
        Self {
            paused: Some(paused),
            ..Self::default()
        }
    }
}

/// Payload of `device:pluginConfig`. Present fields overwrite the current config.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docked: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
}

/// Payload of the outbound `plugin` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginStatus {
    pub name: String,
    pub enabled: bool,
}

impl PluginStatus {
    pub fn webio(enabled: bool) -> Self {
        Self {
            name: crate::constants::PLUGIN_NAME.into(),
            enabled,
        }
    }
}

fn is_false(v: &bool) -> bool {
    !*v
}

/// Keeps an explicit `null` apart from a missing field.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_is_case_insensitive() {
        let p: Position = serde_json::from_str(r#""TOP""#).unwrap();
        assert_eq!(p, Position::Top);
        let p: Position = serde_json::from_str(r#""sideways""#).unwrap();
        assert_eq!(p, Position::Bottom);
    }

    #[test]
    fn filters_accept_list_or_csv() {
        let patch: ControlPatch = serde_json::from_str(r#"{"filters":"error, warn"}"#).unwrap();
        assert_eq!(patch.filters.unwrap().values(), vec!["error", "warn"]);

        let patch: ControlPatch = serde_json::from_str(r#"{"filters":["log"]}"#).unwrap();
        assert_eq!(patch.filters.unwrap().values(), vec!["log"]);
    }

    #[test]
    fn empty_csv_means_no_filter() {
        assert!(Filters::Csv(String::new()).values().is_empty());
    }

    #[test]
    fn control_patch_camel_case() {
        let patch: ControlPatch =
            serde_json::from_str(r#"{"pageSize":10,"paused":true,"search":"foo"}"#).unwrap();
        assert_eq!(patch.page_size, Some(10));
        assert_eq!(patch.paused, Some(true));
        assert_eq!(patch.search, Some(Some("foo".into())));
        assert!(!patch.clear);
        assert!(patch.filters.is_none());
    }

    #[test]
    fn null_search_differs_from_missing_search() {
        let patch: ControlPatch = serde_json::from_str(r#"{"search":null}"#).unwrap();
        assert_eq!(patch.search, Some(None));

        let patch: ControlPatch = serde_json::from_str(r#"{"paused":false}"#).unwrap();
        assert_eq!(patch.search, None);
    }

    #[test]
    fn clear_patch_serializes_only_clear() {
        let json = serde_json::to_string(&ControlPatch::clear()).unwrap();
        assert_eq!(json, r#"{"clear":true}"#);
    }

    #[test]
    fn config_patch_partial() {
        let patch: ConfigPatch = serde_json::from_str(r#"{"height":"120px"}"#).unwrap();
        assert_eq!(patch.height.as_deref(), Some("120px"));
        assert!(patch.docked.is_none());
        assert!(patch.position.is_none());
    }

    #[test]
    fn plugin_status_wire_shape() {
        let json = serde_json::to_value(PluginStatus::webio(true)).unwrap();
        assert_eq!(json, serde_json::json!({"name": "WebIO", "enabled": true}));
    }
}
