use crate::error::ShellError;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct Flags {
    flags: HashMap<String, Flag>,
}

#[derive(Debug, Clone)]
pub struct Flag {
    pub short: Option<String>,
    pub long: String,
    pub description: String,
    pub takes_value: bool,
    pub value: Option<String>,
}

impl Default for Flags {
    fn default() -> Self {
        Self::new()
    }
}

impl Flags {
    pub fn new() -> Self {
        let mut flags = HashMap::new();

        flags.insert(
            "help".to_string(),
            Flag {
                short: Some("-h".to_string()),
                long: "--help".to_string(),
                description: "Print this help message".to_string(),
                takes_value: false,
                value: None,
            },
        );

        flags.insert(
            "version".to_string(),
            Flag {
                short: Some("-v".to_string()),
                long: "--version".to_string(),
                description: "Show version information".to_string(),
                takes_value: false,
                value: None,
            },
        );

        flags.insert(
            "username".to_string(),
            Flag {
                short: None,
                long: "--username".to_string(),
                description: "Name used in the greeting and farewell (--username=<name>)"
                    .to_string(),
                takes_value: true,
                value: None,
            },
        );

        flags.insert(
            "quiet".to_string(),
            Flag {
                short: Some("-q".to_string()),
                long: "--quiet".to_string(),
                description: "Suppress line editor warnings".to_string(),
                takes_value: false,
                value: None,
            },
        );

        flags.insert(
            "debug".to_string(),
            Flag {
                short: Some("-d".to_string()),
                long: "--debug".to_string(),
                description: "Enable debug output on stderr".to_string(),
                takes_value: false,
                value: None,
            },
        );

        Flags { flags }
    }

    pub fn parse(&mut self, args: &[String]) -> Result<(), ShellError> {
        let mut i = 0;
        while i < args.len() {
            let arg = args[i].as_str();
            let (name, inline_value) = match arg.split_once('=') {
                Some((name, value)) => (name, Some(value)),
                None => (arg, None),
            };

            for flag in self.flags.values_mut() {
                let matches = name == flag.long || flag.short.as_deref() == Some(name);
                if !matches {
                    continue;
                }

                if flag.takes_value {
                    let value = match inline_value {
                        Some(value) => value.to_string(),
                        None if i + 1 < args.len() => {
                            i += 1;
                            args[i].clone()
                        }
                        None => {
                            return Err(ShellError::FlagError(format!(
                                "Flag {} requires a value",
                                flag.long
                            )))
                        }
                    };
                    if value.is_empty() {
                        return Err(ShellError::FlagError(format!(
                            "Flag {} requires a non-empty value",
                            flag.long
                        )));
                    }
                    flag.value = Some(value);
                } else {
                    flag.value = Some("true".to_string());
                }
            }
            i += 1;
        }
        Ok(())
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.flags
            .get(name)
            .and_then(|f| f.value.as_ref())
            .is_some()
    }

    pub fn get_value(&self, name: &str) -> Option<&String> {
        self.flags.get(name).and_then(|f| f.value.as_ref())
    }

    pub fn print_help(&self) {
        println!("Usage: fileman [OPTIONS]");
        println!("\nOptions:");
        let mut flags: Vec<&Flag> = self.flags.values().collect();
        flags.sort_by(|a, b| a.long.cmp(&b.long));
        for flag in flags {
            let short = flag.short.as_deref().unwrap_or("  ");
            println!("  {}, {:<15} {}", short, flag.long, flag.description);
        }
    }
}
