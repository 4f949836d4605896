use agrigenius_language::LanguageService;
use clap::Args;

/// Print the welcome message for a language
#[derive(Args, Debug)]
pub struct GreetingCommand {
    /// Language code; unknown codes get the English greeting
    #[arg(short, long, default_value = "en")]
    pub language: String,
}

impl GreetingCommand {
    pub fn execute(&self) -> anyhow::Result<()> {
        println!("{}", LanguageService::passthrough().greeting(&self.language));
        Ok(())
    }
}
