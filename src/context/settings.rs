use serde::{Deserialize, Serialize};

/// Behaviour switches of a `Context`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextParams {
    /// Binding a texture name that was never generated creates the texture
    /// object on the fly, as OpenGL 1.x does. When disabled, such binds fail
    /// with `Error::InvalidOperation`.
    pub implicit_texture_names: bool,
}

impl Default for ContextParams {
    fn default() -> Self {
        ContextParams {
            implicit_texture_names: true,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn deserialize() {
        let params: ContextParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params, ContextParams::default());

        let params: ContextParams =
            serde_json::from_str(r#"{ "implicit_texture_names": false }"#).unwrap();
        assert!(!params.implicit_texture_names);
    }
}
