use crate::core::config::data::Config;
use crate::core::settings::{DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};

impl Config {
    pub fn print_all(&self) {
        println!("Current configuration:");
        match &self.default_model {
            Some(model) => println!("  default-model: {model}"),
            None => println!("  default-model: (unset)"),
        }
        match self.temperature {
            Some(temperature) => println!("  temperature: {temperature:.1}"),
            None => println!("  temperature: (unset, {DEFAULT_TEMPERATURE:.1})"),
        }
        match self.max_tokens {
            Some(max_tokens) => println!("  max-tokens: {max_tokens}"),
            None => println!("  max-tokens: (unset, {DEFAULT_MAX_TOKENS})"),
        }
        match &self.base_url {
            Some(url) => println!("  base-url: {url}"),
            None => println!("  base-url: (unset)"),
        }
        match &self.log_file {
            Some(path) => println!("  log-file: {path}"),
            None => println!("  log-file: (unset)"),
        }
    }
}
