use camino::{Utf8Path, Utf8PathBuf};

macro_rules! define_paths {
    ($name:ident { $($field:ident : $default:expr),* $(,)? }) => {
        #[derive(Clone, Debug)]
        pub struct $name {
            $(pub $field: Utf8PathBuf,)*
        }

        impl $name {
            pub fn to_absolute(mut self, base: &Utf8Path) -> Self {
                $(self.$field = base.join(self.$field);)*
                self
            }

            pub fn new(base: &Utf8Path) -> Self {
                Self::default().to_absolute(base)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    $($field: $default.into(),)*
                }
            }
        }
    };
}

// Install layout of an SPT game directory, relative to the game root.
define_paths!(SPTPathRules {
    client_root: "BepInEx",
    client_plugins: "BepInEx/plugins",
    server_root: "user",
    server_mods: "user/mods",
});

impl SPTPathRules {
    /// Lowercased `dir/` form of the two marker roots, as the classifier matches them.
    pub fn markers(&self) -> (String, String) {
        (marker_of(&self.client_root), marker_of(&self.server_root))
    }
}

fn marker_of(dir: &Utf8Path) -> String {
    format!("{}/", dir.as_str().to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rules_resolve_against_game_root() {
        let rules = SPTPathRules::new(Utf8Path::new("/games/spt"));
        assert_eq!(rules.client_plugins, "/games/spt/BepInEx/plugins");
        assert_eq!(rules.server_mods, "/games/spt/user/mods");
    }

    #[test]
    fn markers_are_lowercased_dirs() {
        assert_eq!(
            SPTPathRules::default().markers(),
            ("bepinex/".to_string(), "user/".to_string())
        );
    }
}
