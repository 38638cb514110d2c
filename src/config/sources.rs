//! Configuration sources, in increasing precedence

pub mod global_file;
pub mod workspace_file;

pub mod environment {
    //! `MODROOT__SECTION__KEY` environment overrides

    use config::builder::DefaultState;
    use config::{ConfigBuilder, Environment};

    pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
        builder.add_source(
            Environment::with_prefix("MODROOT")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
    }
}
