mod shell_config;

pub use shell_config::{
    DEFAULT_FAREWELL, DEFAULT_GREETING, DEFAULT_PROMPT, ShellConfig, ShellConfigError,
};
