/// Labels shown by the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiConfig {
    pub title: String,
    pub placeholder: String,
}

impl UiConfig {
    pub const DEFAULT_TITLE: &'static str = "Item";
    pub const DEFAULT_PLACEHOLDER: &'static str = "Select item";
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            title: Self::DEFAULT_TITLE.to_string(),
            placeholder: Self::DEFAULT_PLACEHOLDER.to_string(),
        }
    }
}
