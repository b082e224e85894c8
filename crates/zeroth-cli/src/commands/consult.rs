//! Free-text questions and the symptom interview.

use super::{failed, require_session};
use crate::app::AppContext;
use crate::prompt::{BACK_COMMAND, Input, Prompter, QUIT_COMMAND, resolve_choice};
use anyhow::{Result, anyhow, bail};
use colored::Colorize;
use zeroth_core::consultation::ConsultationError;
use zeroth_core::interview::{AnswerOutcome, Interview, QuestionKind};
use zeroth_core::pet::PetId;

pub async fn ask(ctx: &AppContext, pet: Option<PetId>, content: &str) -> Result<()> {
    require_session(ctx).await?;
    let pet_id = match pet {
        Some(id) => id,
        None => choose_pet(ctx, &mut Prompter::new()?).await?,
    };

    println!("{}", "Asking, this can take a little while...".bright_black());
    let answer = ctx
        .consultation
        .ask(Some(pet_id), content)
        .await
        .map_err(consultation_failed)?;
    print_answer(&answer);
    Ok(())
}

pub async fn interview(ctx: &AppContext, pet: Option<PetId>) -> Result<()> {
    require_session(ctx).await?;
    let mut prompter = Prompter::new()?;
    let pet_id = match pet {
        Some(id) => id,
        None => choose_pet(ctx, &mut prompter).await?,
    };

    let mut session_changes = ctx.session.subscribe();
    session_changes.borrow_and_update();

    let mut interview = Interview::new(ctx.catalog.clone());
    println!(
        "{}",
        format!("Type {BACK_COMMAND} to change the previous answer or {QUIT_COMMAND} to stop.")
            .bright_black()
    );

    loop {
        if walk(&mut prompter, &mut interview)? == Walk::Quit {
            println!("Interview cancelled.");
            return Ok(());
        }

        println!();
        for answer in interview.answers() {
            println!("  {} {}", format!("{}:", answer.prompt).bright_black(), answer.value);
        }
        if !prompter.confirm("Send these answers? (n changes the last one)", true)? {
            interview.back();
            continue;
        }

        println!("{}", "Asking, this can take a little while...".bright_black());
        match ctx.consultation.submit(&interview, Some(pet_id)).await {
            Ok(answer) => {
                print_answer(&answer);
                return Ok(());
            }
            Err(err) => {
                eprintln!("{}", err.user_message().red());
                let ended = session_changes.has_changed().unwrap_or(false)
                    && !session_changes.borrow_and_update().is_signed_in();
                if ended {
                    bail!("Your session has ended. Run `zeroth login` again.");
                }
                if !prompter.confirm("Try again?", true)? {
                    bail!("The consultation was not sent");
                }
            }
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Walk {
    Complete,
    Quit,
}

/// Asks until every question has an answer or the user quits.
fn walk(prompter: &mut Prompter, interview: &mut Interview) -> Result<Walk> {
    let total = interview.catalog().len();
    while let Some(question) = interview.current_question() {
        let position = format!("[{}/{}]", interview.cursor() + 1, total);
        let prompt = question.prompt.clone();
        let options = question.options().to_vec();
        let free_text = question.kind == QuestionKind::FreeText;

        println!("\n{} {}", position.bright_black(), prompt.bold());
        for (i, option) in options.iter().enumerate() {
            println!("  {} {}", format!("{}.", i + 1).bright_black(), option);
        }

        match prompter.interview_line("> ", &options)? {
            Input::Quit => return Ok(Walk::Quit),
            Input::Back => {
                if !interview.back() {
                    println!("{}", "This is the first question.".yellow());
                }
            }
            Input::Line(line) => {
                let value = normalize_answer(&line, &options);
                if interview.answer(&value) == AnswerOutcome::Rejected {
                    let hint = if free_text {
                        "Please type an answer."
                    } else {
                        "Please pick one of the options, by number or by name."
                    };
                    println!("{}", hint.yellow());
                }
            }
        }
    }
    Ok(Walk::Complete)
}

/// Lets a choice be typed by number; free text passes through untouched.
fn normalize_answer(line: &str, options: &[String]) -> String {
    match resolve_choice(line.trim(), options) {
        Some(index) => options[index].clone(),
        None => line.to_string(),
    }
}

async fn choose_pet(ctx: &AppContext, prompter: &mut Prompter) -> Result<PetId> {
    let pets = ctx.pets.list().await.map_err(|e| failed("Loading pets", e))?;
    match pets.as_slice() {
        [] => bail!("You have no pets yet. Add one with `zeroth pets add`."),
        [only] => {
            println!("Consulting about {}.", only.label().bold());
            Ok(only.id)
        }
        _ => {
            let labels: Vec<String> = pets.iter().map(|pet| pet.label()).collect();
            let index = prompter.choose("Which pet?", &labels)?;
            Ok(pets[index].id)
        }
    }
}

fn consultation_failed(err: ConsultationError) -> anyhow::Error {
    match &err {
        ConsultationError::Api(api) if api.is_unauthorized() => anyhow!(
            "{}\nYour session has ended. Run `zeroth login` again.",
            err.user_message()
        ),
        _ => anyhow!(err.user_message()),
    }
}

fn print_answer(answer: &str) {
    println!("\n{}", "0thOpinion".bright_magenta().bold());
    for line in answer.lines() {
        println!("{}", line.bright_blue());
    }
    println!(
        "\n{}",
        "This is not a diagnosis. See a veterinarian if you are worried.".bright_black()
    );
}
