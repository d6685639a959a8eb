//! GenieTalk terminal front-end
//!
//!  ❯ GOOGLE_API_KEY=... genie-talk --persona "Coding Help" --language hindi

use anyhow::{Context, Result};
use clap::Parser;
use genie_talk::adapters::services::llm::GoogleService;
use genie_talk::adapters::services::translate::GoogleTranslateService;
use genie_talk::adapters::DocumentLoader;
use genie_talk::assistant::{
    MutedSpeechOutput, Notice, Orchestrator, SessionContext, Severity, TurnOrigin, TurnOutcome,
};
use genie_talk::config::AppConfig;
use genie_talk::domain::{Language, Persona};
use genie_talk::ports::{ChatModelPort, SpeechOutputPort};
use genie_talk::utils::export::write_export;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

/// CLI switches
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Starting persona, by display name
    #[arg(long)]
    persona: Option<String>,

    /// Reply language, by name or code (e.g. "hindi" or "hi")
    #[arg(long)]
    language: Option<String>,

    /// File to load before the first turn (.txt or .pdf)
    #[arg(long)]
    upload: Option<PathBuf>,

    /// Directory for `/export` when none is given
    #[arg(long, default_value = ".")]
    export_dir: PathBuf,

    /// Do not speak replies
    #[arg(long)]
    mute: bool,
}

/// One line of REPL input
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Say(String),
    Voice,
    Summarize,
    Persona(String),
    Language(String),
    Upload(PathBuf),
    Clear,
    Export(Option<PathBuf>),
    History,
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    fn parse(line: &str) -> Command {
        let trimmed = line.trim();
        let Some(rest) = trimmed.strip_prefix('/') else {
            return Command::Say(line.to_string());
        };

        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };

        match (name, arg) {
            ("voice", _) => Command::Voice,
            ("summarize", _) => Command::Summarize,
            ("persona", arg) => Command::Persona(arg.to_string()),
            ("language", arg) => Command::Language(arg.to_string()),
            ("upload", arg) if !arg.is_empty() => Command::Upload(PathBuf::from(arg)),
            ("clear", _) => Command::Clear,
            ("export", "") => Command::Export(None),
            ("export", arg) => Command::Export(Some(PathBuf::from(arg))),
            ("history", _) => Command::History,
            ("help", _) => Command::Help,
            ("quit" | "exit", _) => Command::Quit,
            _ => Command::Unknown(trimmed.to_string()),
        }
    }
}

const HELP: &str = "\
Type a message and press Enter, or use a command:
  /voice               speak your question (push to talk)
  /summarize           summarize the uploaded file (Text Summarizer only)
  /persona <name>      switch task persona
  /language <name>     reply language (English, Hindi, Spanish, French, German, Tamil, Bengali)
  /upload <path>       load a .txt or .pdf file
  /clear               clear the conversation
  /export [dir]        save the conversation as a text file
  /history             show the conversation
  /quit                leave";

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = AppConfig::from_env().context("Failed to load configuration")?;

    let mut ctx = SessionContext::new();
    if let Some(name) = &args.persona {
        let persona = Persona::from_display_name(name)
            .with_context(|| format!("Unknown persona {:?}", name))?;
        ctx.select_persona(persona);
    }
    if let Some(name) = &args.language {
        let language =
            Language::parse(name).with_context(|| format!("Unknown language {:?}", name))?;
        ctx.select_language(language);
    }

    let loader = DocumentLoader::new();
    if let Some(path) = &args.upload {
        let document = loader
            .load_path(path)
            .with_context(|| format!("Failed to load {}", path.display()))?;
        ctx.set_document(document);
    }

    let orchestrator = build_orchestrator(&config, args.mute)?;

    println!("🧞 Welcome to GenieTalk, your voice-enabled AI assistant.");
    println!("Persona: {}  Language: {}", ctx.persona(), ctx.language());
    if let Some(hint) = ctx.persona().suggestion() {
        println!("{}", hint);
    }
    println!("Type /help for commands.\n");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match Command::parse(&line) {
            Command::Say(text) if text.trim().is_empty() => continue,
            Command::Say(text) => {
                let outcome = orchestrator.submit_text(&mut ctx, &text).await;
                render(&outcome);
            }
            Command::Voice => {
                println!("🎙️ Listening...");
                let outcome = orchestrator.submit_voice(&mut ctx).await;
                render(&outcome);
            }
            Command::Summarize => {
                let outcome = orchestrator.summarize_document(&mut ctx).await;
                render(&outcome);
            }
            Command::Persona(name) => match Persona::from_display_name(&name) {
                Some(persona) => {
                    ctx.select_persona(persona);
                    println!("Persona: {}", persona);
                    if let Some(hint) = persona.suggestion() {
                        println!("{}", hint);
                    }
                }
                None => {
                    let names: Vec<&str> = Persona::ALL.iter().map(|p| p.display_name()).collect();
                    println!("Unknown persona. Choose one of: {}", names.join(", "));
                }
            },
            Command::Language(name) => match Language::parse(&name) {
                Some(language) => {
                    ctx.select_language(language);
                    println!("Replies in {}", language);
                }
                None => {
                    let names: Vec<&str> =
                        Language::ALL.iter().map(|l| l.display_name()).collect();
                    println!("Unknown language. Choose one of: {}", names.join(", "));
                }
            },
            Command::Upload(path) => upload(&loader, &mut ctx, &path),
            Command::Clear => {
                orchestrator.reset(&mut ctx);
                println!("Conversation cleared.");
            }
            Command::Export(dir) => {
                let dir = dir.unwrap_or_else(|| args.export_dir.clone());
                let export = orchestrator.export(&ctx);
                match write_export(&export, &dir) {
                    Ok(path) => println!("📄 Saved {}", path.display()),
                    Err(e) => println!("⚠️ Export failed: {}", e),
                }
            }
            Command::History => {
                for message in ctx.transcript().messages() {
                    println!("{}: {}", message.role.to_string().to_uppercase(), message.content);
                }
            }
            Command::Help => println!("{}", HELP),
            Command::Quit => break,
            Command::Unknown(line) => println!("Unknown command {}. Type /help.", line),
        }
    }

    Ok(())
}

fn build_orchestrator(config: &AppConfig, mute: bool) -> Result<Orchestrator> {
    let chat_model = GoogleService::new(config.google_api_key.clone(), config.request_timeout)?;
    ensure_configured(&chat_model)?;
    let translator = GoogleTranslateService::new(config.cloud_api_key.clone())?;
    log::info!("Chat provider: {} ({})", chat_model.provider_name(), config.model);

    let speech_output: Arc<dyn SpeechOutputPort> = if mute {
        Arc::new(MutedSpeechOutput)
    } else {
        audio::speech_output(config)?
    };

    let orchestrator = Orchestrator::new(
        Arc::new(chat_model),
        Arc::new(translator),
        speech_output,
        config.llm_config(),
    );

    Ok(match audio::speech_input(config)? {
        Some(input) => orchestrator.with_speech_input(input, config.listen_timeout),
        None => orchestrator,
    })
}

/// Refuse to start with a chat model that cannot authenticate
fn ensure_configured(chat_model: &dyn ChatModelPort) -> Result<()> {
    anyhow::ensure!(
        chat_model.is_configured(),
        "{} chat model has no API key",
        chat_model.provider_name()
    );
    Ok(())
}

#[cfg(target_os = "linux")]
mod audio {
    use super::*;
    use genie_talk::adapters::audio::{PulseAudioMicrophone, PulseAudioSpeaker};
    use genie_talk::adapters::services::asr::GoogleSpeechService;
    use genie_talk::adapters::services::tts::GoogleTtsService;
    use genie_talk::assistant::{SpeechInput, SpeechOutput};
    use genie_talk::ports::TranscriptionConfig;

    pub fn speech_output(config: &AppConfig) -> Result<Arc<dyn SpeechOutputPort>> {
        let synthesizer = GoogleTtsService::new(config.cloud_api_key.clone())?;
        // The worker ends with the process
        let (output, _worker) = SpeechOutput::spawn(
            Arc::new(synthesizer),
            Arc::new(PulseAudioSpeaker::new()),
            config.synthesis_config(),
        );
        Ok(Arc::new(output))
    }

    pub fn speech_input(config: &AppConfig) -> Result<Option<SpeechInput>> {
        let recognizer = GoogleSpeechService::new(config.cloud_api_key.clone())?;
        Ok(Some(SpeechInput::new(
            Arc::new(PulseAudioMicrophone::new()),
            Arc::new(recognizer),
            TranscriptionConfig::default(),
        )))
    }
}

#[cfg(not(target_os = "linux"))]
mod audio {
    use super::*;
    use genie_talk::assistant::SpeechInput;

    pub fn speech_output(_config: &AppConfig) -> Result<Arc<dyn SpeechOutputPort>> {
        log::warn!("No audio output backend on this platform; replies will not be spoken");
        Ok(Arc::new(MutedSpeechOutput))
    }

    pub fn speech_input(_config: &AppConfig) -> Result<Option<SpeechInput>> {
        log::warn!("No microphone backend on this platform; /voice is unavailable");
        Ok(None)
    }
}

fn upload(loader: &DocumentLoader, ctx: &mut SessionContext, path: &Path) {
    match loader.load_path(path) {
        Ok(document) => {
            if document.has_content() {
                println!("📎 Loaded {} ({} characters)", document.file_name, document.text.len());
            } else {
                println!("📎 Loaded {}, but no text could be extracted", document.file_name);
            }
            ctx.set_document(document);
        }
        Err(e) => println!("⚠️ Could not load file: {}", e),
    }
}

fn render(outcome: &TurnOutcome) {
    match outcome {
        TurnOutcome::Replied(turn) => {
            if turn.origin == TurnOrigin::Voice {
                println!("🗣️ {}", turn.user_entry);
            }
            for warning in &turn.warnings {
                render_notice(warning);
            }
            println!("🧞 {}\n", turn.reply);
        }
        TurnOutcome::NoInput(notice) | TurnOutcome::Failed(notice) => render_notice(notice),
    }
}

fn render_notice(notice: &Notice) {
    match notice.severity {
        Severity::Warning => println!("{}", notice.message),
        Severity::Error => {
            println!("{}", notice.message);
            if let Some(detail) = &notice.detail {
                println!("   details: {}", detail);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("hello there"), Command::Say("hello there".to_string()));
        assert_eq!(Command::parse("  indented  "), Command::Say("  indented  ".to_string()));
        assert_eq!(Command::parse("/voice"), Command::Voice);
        assert_eq!(
            Command::parse("/persona Coding Help"),
            Command::Persona("Coding Help".to_string())
        );
        assert_eq!(Command::parse("/export"), Command::Export(None));
        assert_eq!(
            Command::parse("/export out"),
            Command::Export(Some(PathBuf::from("out")))
        );
        assert_eq!(
            Command::parse("/upload ~/cv.pdf"),
            Command::Upload(PathBuf::from("~/cv.pdf"))
        );
        assert!(matches!(Command::parse("/upload"), Command::Unknown(_)));
        assert!(matches!(Command::parse("/dance"), Command::Unknown(_)));
        assert_eq!(Command::parse("/quit"), Command::Quit);
    }

    #[test]
    fn test_unconfigured_chat_model_is_rejected() {
        let missing_key = GoogleService::new(String::new(), Duration::from_secs(5)).unwrap();
        let err = ensure_configured(&missing_key).unwrap_err();
        assert!(err.to_string().contains("google"));

        let with_key = GoogleService::new("key".to_string(), Duration::from_secs(5)).unwrap();
        assert!(ensure_configured(&with_key).is_ok());
    }
}
