//! Registry configuration

/// Attribute names and marker strings used by the registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Attribute flagging server-rendered style tags; its value is the style id
    pub ssr_attribute: String,
    /// Attribute set (empty) on tags the registry creates
    pub client_attribute: String,
    /// Token replaced with the resolved id in dynamic rule templates
    pub placeholder_token: String,
    /// Prefix of computed ids
    pub id_prefix: String,
    /// Inert rule swapped into freed shared-sheet slots
    pub deleted_rule: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            ssr_attribute: "data-jsx-ssr".to_string(),
            client_attribute: "data-jsx-client".to_string(),
            placeholder_token: "jsx-xxx".to_string(),
            id_prefix: "jsx-".to_string(),
            deleted_rule: "styledjsx-deleted-rule {}".to_string(),
        }
    }
}
