use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};

use studymate_core::config_file::{
    self, ChunkingSection, ConfigFile, DisplaySection, ResponsesSection,
};
use studymate_core::{
    DEFAULT_CONTEXT_CHUNKS, DEFAULT_MAX_CHUNK_CHARS, DEFAULT_MAX_RESPONSE_CHARS, ProcessedBatch,
    StudySession,
};
use studymate_ingest::IngestProgress;
use studymate_parsing::export;
use studymate_parsing::study::DEFAULT_ITEMS;
use studymate_parsing::{
    ExplanationLevel, ParsingConfigBuilder, QuizKind, StudyPipeline, SummaryLength,
};
use studymate_pdf_mupdf::MupdfBackend;

mod output;

use output::ColorMode;

/// StudyMate - Turn course PDFs into summaries, flashcards and quizzes
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Maximum characters per text chunk
    #[arg(long, global = true)]
    max_chunk_chars: Option<usize>,

    /// Path to a TOML config file (default: platform config + ./.studymate.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print study statistics before exiting
    #[arg(long, global = true)]
    stats: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract and chunk PDFs, then report what was found
    Process {
        /// PDF files to process
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Write the chunks to this file, separated by blank lines
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write the chunks to chunks.txt
        #[arg(long, conflicts_with = "output")]
        save: bool,
    },

    /// Ask a question about the PDFs
    Ask {
        /// The question to answer
        question: String,

        /// PDF files to use as context
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Explanation level: simple, intermediate or advanced
        #[arg(long, default_value = "intermediate")]
        level: ExplanationLevel,
    },

    /// Summarize the PDFs
    Summarize {
        /// PDF files to summarize
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Summary length: very-short, short, medium or detailed
        #[arg(long, default_value = "medium")]
        length: SummaryLength,

        /// Write the summary to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write the summary to document_summary.txt
        #[arg(long, conflicts_with = "output")]
        save: bool,
    },

    /// Generate flashcards from the PDFs
    Flashcards {
        /// PDF files to study
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Number of flashcards (clamped to 3..=10)
        #[arg(short = 'n', long, default_value_t = DEFAULT_ITEMS)]
        count: usize,

        /// Write the flashcards to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write the flashcards to flashcards.txt
        #[arg(long, conflicts_with = "output")]
        save: bool,
    },

    /// Generate a practice quiz from the PDFs
    Quiz {
        /// PDF files to study
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Question style: multiple-choice or true-false
        #[arg(long, default_value = "multiple choice")]
        kind: QuizKind,

        /// Number of questions (clamped to 3..=10)
        #[arg(short = 'n', long, default_value_t = DEFAULT_ITEMS)]
        count: usize,

        /// Write the quiz to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write the quiz to quiz.txt
        #[arg(long, conflicts_with = "output")]
        save: bool,
    },

    /// List capitalized key terms from the PDFs
    Keywords {
        /// PDF files to scan
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Run a free-form instruction through the response templates
    Respond {
        /// Instruction text, e.g. "make a flashcard"
        instruction: String,

        /// PDF files to use as context
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Maximum context characters in the response
        #[arg(long)]
        max_length: Option<usize>,
    },

    /// Write the effective settings to a config file
    InitConfig {
        /// Destination (default: platform config directory)
        path: Option<PathBuf>,
    },
}

/// Effective settings after layering flags, env vars and the config file.
#[derive(Debug, Clone)]
struct Settings {
    max_chunk_chars: usize,
    max_response_chars: usize,
    context_chunks: usize,
    color: bool,
}

impl Settings {
    /// Resolve configuration: CLI flags > env vars > config file > defaults
    fn resolve(cli: &Cli, file: &ConfigFile) -> Self {
        let env_max_chunk = std::env::var("STUDYMATE_MAX_CHUNK_CHARS")
            .ok()
            .and_then(|v| v.parse().ok());
        let chunking = file.chunking.as_ref();
        let responses = file.responses.as_ref();

        Settings {
            max_chunk_chars: cli
                .max_chunk_chars
                .or(env_max_chunk)
                .or_else(|| chunking.and_then(|c| c.max_chunk_chars))
                .unwrap_or(DEFAULT_MAX_CHUNK_CHARS),
            max_response_chars: responses
                .and_then(|r| r.max_length)
                .unwrap_or(DEFAULT_MAX_RESPONSE_CHARS),
            context_chunks: responses
                .and_then(|r| r.context_chunks)
                .unwrap_or(DEFAULT_CONTEXT_CHUNKS),
            color: !cli.no_color
                && file
                    .display
                    .as_ref()
                    .and_then(|d| d.color)
                    .unwrap_or(true),
        }
    }

    fn pipeline(&self) -> anyhow::Result<StudyPipeline> {
        let config = ParsingConfigBuilder::new()
            .max_chunk_chars(self.max_chunk_chars)
            .max_response_chars(self.max_response_chars)
            .context_chunks(self.context_chunks)
            .build()?;
        Ok(StudyPipeline::with_config(config))
    }

    fn to_config_file(&self) -> ConfigFile {
        ConfigFile {
            chunking: Some(ChunkingSection {
                max_chunk_chars: Some(self.max_chunk_chars),
            }),
            responses: Some(ResponsesSection {
                max_length: Some(self.max_response_chars),
                context_chunks: Some(self.context_chunks),
            }),
            display: Some(DisplaySection {
                color: Some(self.color),
            }),
        }
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_file_config(path: Option<&Path>) -> anyhow::Result<ConfigFile> {
    match path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found at {}", path.display());
            }
            config_file::load_from_path(path)
                .ok_or_else(|| anyhow::anyhow!("Could not parse config file {}", path.display()))
        }
        None => Ok(config_file::load_config()),
    }
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let file_config = load_file_config(cli.config.as_deref())?;
    let settings = Settings::resolve(&cli, &file_config);
    tracing::debug!(?settings, "resolved settings");

    if let Command::InitConfig { path } = &cli.command {
        let config = settings.to_config_file();
        let written = match path {
            Some(path) => {
                config_file::save_to_path(&config, path).map_err(anyhow::Error::msg)?;
                path.clone()
            }
            None => config_file::save_config(&config).map_err(anyhow::Error::msg)?,
        };
        println!("Config written to {}", written.display());
        return Ok(());
    }

    let app = App {
        pipeline: settings.pipeline()?,
        backend: MupdfBackend,
        color: ColorMode(settings.color),
    };
    let mut session = StudySession::new();
    let mut writer: Box<dyn Write> = Box::new(std::io::stdout());

    app.run(cli.command, &mut session, &mut writer)?;

    if cli.stats {
        writeln!(writer)?;
        output::print_stats(&mut writer, &session.stats, app.color)?;
    }
    Ok(())
}

struct App {
    pipeline: StudyPipeline,
    backend: MupdfBackend,
    color: ColorMode,
}

impl App {
    fn run(
        &self,
        command: Command,
        session: &mut StudySession,
        w: &mut dyn Write,
    ) -> anyhow::Result<()> {
        match command {
            Command::Process {
                files,
                output,
                save,
            } => {
                self.load(&files, session, w)?;
                let target = output.or_else(|| save.then(|| export::DEFAULT_CHUNKS_FILE.into()));
                self.save(target, &export::chunks_to_text(&session.chunks), w)?;
            }
            Command::Ask {
                question,
                files,
                level,
            } => {
                if question.trim().is_empty() {
                    anyhow::bail!("Question must not be empty");
                }
                self.load(&files, session, w)?;
                let answer = self
                    .pipeline
                    .answer_question(&question, level, &session.chunks);
                output::print_response(w, "Answer", &answer, self.color)?;
            }
            Command::Summarize {
                files,
                length,
                output,
                save,
            } => {
                self.load(&files, session, w)?;
                let summary = self.pipeline.summarize(length, &session.chunks);
                output::print_response(w, "Document Summary", &summary, self.color)?;
                let target = output.or_else(|| save.then(|| export::DEFAULT_SUMMARY_FILE.into()));
                self.save(target, &summary, w)?;
            }
            Command::Flashcards {
                files,
                count,
                output,
                save,
            } => {
                self.load(&files, session, w)?;
                let cards = self.pipeline.flashcards(count, &session.chunks);
                session.record_flashcards(cards.len());
                output::print_flashcards(w, &cards, self.color)?;
                let target =
                    output.or_else(|| save.then(|| export::DEFAULT_FLASHCARDS_FILE.into()));
                self.save(target, &export::flashcards_to_text(&cards), w)?;
            }
            Command::Quiz {
                files,
                kind,
                count,
                output,
                save,
            } => {
                self.load(&files, session, w)?;
                let quiz = self.pipeline.quiz(kind, count, &session.chunks);
                session.record_quiz();
                output::print_quiz(w, &quiz, self.color)?;
                let target = output.or_else(|| save.then(|| export::DEFAULT_QUIZ_FILE.into()));
                self.save(target, &export::quiz_to_text(&quiz), w)?;
            }
            Command::Keywords { files } => {
                self.load(&files, session, w)?;
                let terms = self.pipeline.key_terms(&session.chunks);
                output::print_heading(w, "Key Terms", self.color)?;
                if terms.is_empty() {
                    writeln!(w, "(none found)")?;
                }
                for term in terms {
                    writeln!(w, "- {}", term)?;
                }
            }
            Command::Respond {
                instruction,
                files,
                max_length,
            } => {
                self.load(&files, session, w)?;
                let kind = self.pipeline.classify(&instruction);
                let response = match max_length {
                    Some(n) => self
                        .pipeline
                        .respond_with_limit(&instruction, &session.chunks, n),
                    None => self.pipeline.respond(&instruction, &session.chunks),
                };
                output::print_response(w, kind.label(), &response, self.color)?;
            }
            Command::InitConfig { .. } => {}
        }
        Ok(())
    }

    /// Extract and chunk `files` behind a spinner, then record the batch.
    fn load(
        &self,
        files: &[PathBuf],
        session: &mut StudySession,
        w: &mut dyn Write,
    ) -> anyhow::Result<()> {
        for path in files {
            if !path.exists() {
                anyhow::bail!("File not found: {}", path.display());
            }
        }

        let batch = self.extract_with_spinner(files)?;
        output::print_batch_summary(w, &batch, self.color)?;
        session.record_batch(batch);
        Ok(())
    }

    fn extract_with_spinner(&self, files: &[PathBuf]) -> anyhow::Result<ProcessedBatch> {
        use indicatif::{ProgressBar, ProgressStyle};

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.enable_steady_tick(Duration::from_millis(120));

        let result = studymate_ingest::process_files_with_progress(
            files,
            &self.backend,
            &self.pipeline,
            |event| match event {
                IngestProgress::Extracting { index, total, path } => {
                    let name = path
                        .file_name()
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| path.display().to_string());
                    spinner.set_message(format!("[{}/{}] Extracting {}", index + 1, total, name));
                }
                IngestProgress::Extracted { .. } => {}
                IngestProgress::Chunked { chunks } => {
                    spinner.set_message(format!("Split into {} chunks", chunks));
                }
            },
        );
        spinner.finish_and_clear();
        Ok(result?)
    }

    fn save(
        &self,
        target: Option<PathBuf>,
        contents: &str,
        w: &mut dyn Write,
    ) -> anyhow::Result<()> {
        if let Some(path) = target {
            export::write_text_file(&path, contents)?;
            writeln!(w, "Saved to {}", path.display())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("studymate").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn parses_quiz_options() {
        let cli = parse(&["quiz", "notes.pdf", "--kind", "true-false", "-n", "7"]);
        match cli.command {
            Command::Quiz {
                files, kind, count, ..
            } => {
                assert_eq!(files, vec![PathBuf::from("notes.pdf")]);
                assert_eq!(kind, QuizKind::TrueFalse);
                assert_eq!(count, 7);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = parse(&["keywords", "a.pdf", "b.pdf", "--no-color", "--stats", "-vv"]);
        assert!(cli.no_color);
        assert!(cli.stats);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn files_are_required() {
        let err = Cli::try_parse_from(["studymate", "summarize"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn unknown_level_is_rejected() {
        let args = ["studymate", "ask", "why?", "a.pdf", "--level", "expert"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn flag_overrides_config_file() {
        let cli = parse(&["process", "a.pdf", "--max-chunk-chars", "120"]);
        let file = ConfigFile {
            chunking: Some(ChunkingSection {
                max_chunk_chars: Some(800),
            }),
            ..Default::default()
        };
        assert_eq!(Settings::resolve(&cli, &file).max_chunk_chars, 120);
    }

    #[test]
    fn config_file_fills_unset_values() {
        let cli = parse(&["process", "a.pdf"]);
        let file = ConfigFile {
            responses: Some(ResponsesSection {
                max_length: Some(300),
                context_chunks: Some(2),
            }),
            display: Some(DisplaySection { color: Some(false) }),
            ..Default::default()
        };
        let settings = Settings::resolve(&cli, &file);
        assert_eq!(settings.max_response_chars, 300);
        assert_eq!(settings.context_chunks, 2);
        assert!(!settings.color);
    }

    #[test]
    fn defaults_without_config() {
        let cli = parse(&["process", "a.pdf"]);
        let settings = Settings::resolve(&cli, &ConfigFile::default());
        assert_eq!(settings.max_response_chars, DEFAULT_MAX_RESPONSE_CHARS);
        assert_eq!(settings.context_chunks, DEFAULT_CONTEXT_CHUNKS);
        assert!(settings.color);
        assert!(settings.pipeline().is_ok());
    }

    #[test]
    fn effective_settings_round_trip_through_config_file() {
        let cli = parse(&["init-config", "--max-chunk-chars", "250", "--no-color"]);
        let settings = Settings::resolve(&cli, &ConfigFile::default());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        config_file::save_to_path(&settings.to_config_file(), &path).unwrap();

        let loaded = load_file_config(Some(&path)).unwrap();
        let reloaded = Settings::resolve(&parse(&["init-config"]), &loaded);
        assert_eq!(reloaded.max_chunk_chars, 250);
        assert!(!reloaded.color);
    }

    #[test]
    fn missing_config_path_is_an_error() {
        let err = load_file_config(Some(Path::new("/nonexistent/studymate.toml"))).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }
}
