use std::io::Write;

use owo_colors::OwoColorize;
use studymate_core::{ProcessedBatch, StudyStats};
use studymate_parsing::{Flashcard, Quiz};

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

/// Print the summary line after a batch of PDFs is processed.
pub fn print_batch_summary(
    w: &mut dyn Write,
    batch: &ProcessedBatch,
    color: ColorMode,
) -> std::io::Result<()> {
    let msg = format!(
        "Processed {} PDF(s) with {} pages and extracted {} text chunks!",
        batch.file_count,
        batch.total_pages,
        batch.chunk_count()
    );
    if color.enabled() {
        writeln!(w, "{}", msg.green())?;
    } else {
        writeln!(w, "{}", msg)?;
    }
    if batch.is_empty() {
        let warn = "No text could be extracted; responses will have an empty context.";
        if color.enabled() {
            writeln!(w, "{}", warn.yellow())?;
        } else {
            writeln!(w, "{}", warn)?;
        }
    }
    writeln!(w)?;
    Ok(())
}

/// Print a section heading.
pub fn print_heading(w: &mut dyn Write, title: &str, color: ColorMode) -> std::io::Result<()> {
    if color.enabled() {
        writeln!(w, "{}", format!("### {}", title).bold().cyan())?;
    } else {
        writeln!(w, "### {}", title)?;
    }
    writeln!(w)?;
    Ok(())
}

/// Print a templated response under a heading.
pub fn print_response(
    w: &mut dyn Write,
    title: &str,
    response: &str,
    color: ColorMode,
) -> std::io::Result<()> {
    print_heading(w, title, color)?;
    writeln!(w, "{}", response)?;
    writeln!(w)?;
    Ok(())
}

pub fn print_flashcards(
    w: &mut dyn Write,
    cards: &[Flashcard],
    color: ColorMode,
) -> std::io::Result<()> {
    let msg = format!("Generated {} flashcards!", cards.len());
    if color.enabled() {
        writeln!(w, "{}\n", msg.green())?;
    } else {
        writeln!(w, "{}\n", msg)?;
    }

    for (i, card) in cards.iter().enumerate() {
        if color.enabled() {
            writeln!(w, "{}", format!("[{}]", i + 1).bold().yellow())?;
            writeln!(w, "{} {}", "Q:".bold(), card.question)?;
            writeln!(w, "{} {}", "A:".bold(), card.answer)?;
        } else {
            writeln!(w, "[{}]", i + 1)?;
            writeln!(w, "Q: {}", card.question)?;
            writeln!(w, "A: {}", card.answer)?;
        }
        writeln!(w)?;
    }
    Ok(())
}

pub fn print_quiz(w: &mut dyn Write, quiz: &Quiz, color: ColorMode) -> std::io::Result<()> {
    let msg = format!(
        "Generated {} {} questions!",
        quiz.questions.len(),
        quiz.kind.display_name()
    );
    if color.enabled() {
        writeln!(w, "{}\n", msg.green())?;
    } else {
        writeln!(w, "{}\n", msg)?;
    }

    for (i, question) in quiz.questions.iter().enumerate() {
        if color.enabled() {
            writeln!(w, "{}", format!("Question {}:", i + 1).bold().yellow())?;
        } else {
            writeln!(w, "Question {}:", i + 1)?;
        }
        writeln!(w, "{}", question)?;
        writeln!(w, "---")?;
    }
    Ok(())
}

/// Print the progress statistics block.
pub fn print_stats(w: &mut dyn Write, stats: &StudyStats, color: ColorMode) -> std::io::Result<()> {
    print_heading(w, "Progress Statistics", color)?;

    let rows = [
        ("Pages Read", stats.pages_read),
        ("Flashcards Created", stats.flashcards_created),
        ("Quizzes Taken", stats.quizzes_taken),
    ];
    for (label, value) in rows {
        if color.enabled() {
            writeln!(w, "{:<20}{}", label, value.bold())?;
        } else {
            writeln!(w, "{:<20}{}", label, value)?;
        }
    }

    if let Some(last) = stats.last_session() {
        let line = format!(
            "Last study session: {}",
            last.date.format("%Y-%m-%d %H:%M")
        );
        if color.enabled() {
            writeln!(w, "{}", line.dimmed())?;
        } else {
            writeln!(w, "{}", line)?;
        }
    }
    Ok(())
}
