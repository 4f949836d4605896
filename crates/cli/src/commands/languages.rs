use agrigenius_language::LanguageService;
use clap::Args;

/// List supported languages
#[derive(Args, Debug)]
pub struct LanguagesCommand {
    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

impl LanguagesCommand {
    pub fn execute(&self) -> anyhow::Result<()> {
        let languages = LanguageService::passthrough().supported_languages();
        if self.json {
            let body = serde_json::json!({ "languages": languages });
            println!("{}", serde_json::to_string_pretty(&body)?);
        } else {
            for option in languages {
                println!("{:<4} {}", option.code, option.name);
            }
        }
        Ok(())
    }
}
