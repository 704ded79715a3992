use quiz_app::{
    config::Config,
    error::Error,
    services::{
        question_service::Mode,
        quiz_service::{QuizSession, QuizState, ScoreReport},
    },
    utils::text::SearchInput,
    AppState,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
Commands:
  mode online|offline     switch data source
  refresh                 download all questions (online only)
  class <text>            type into the class box (class! accepts first suggestion)
  subject <text>          type into the subject box (subject! accepts first suggestion)
  clear                   clear both boxes
  search                  find question sets for the chosen class/subject
  sets                    list question sets
  filter <class>/<subject>  narrow the set list (blank = any)
  pick <n>                select set n
  start                   start the selected set
  answer <n>              choose option n for the current question
  next | prev             move between questions
  submit                  finish and show the score
  back                    return to the set list
  help | quit";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    if std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json")) {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    let config = Config::from_env()?;
    info!(base_url = %config.api_base_url, data_folder = %config.data_folder.display(), "Starting quiz client");

    let mut app = AppState::new(config)?;
    println!("Checking connection to the server...");
    let status = app.question_service.initialize().await;
    println!("{}", status.message);
    println!(
        "{} questions available offline.",
        app.question_service.questions().len()
    );
    app.update_dropdowns();
    println!("{}", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "quit" || line == "exit" {
            break;
        }
        if let Err(e) = handle(&mut app, line).await {
            if e.is_quiz_warning() {
                println!("Warning: {}", e.user_message());
            } else {
                println!("Error: {}", e.user_message());
            }
        }
    }

    Ok(())
}

async fn handle(app: &mut AppState, line: &str) -> Result<(), Error> {
    let (command, arg) = line
        .split_once(' ')
        .map(|(c, a)| (c, a.trim()))
        .unwrap_or((line, ""));

    match command {
        "help" => println!("{}", HELP),
        "mode" => {
            let mode = if arg.eq_ignore_ascii_case("online") {
                Mode::Online
            } else {
                Mode::Offline
            };
            let status = app.question_service.set_mode(mode).await;
            println!("{}", status.message);
        }
        "refresh" => {
            println!("Downloading new data from the server...");
            let outcome = app.question_service.refresh().await?;
            app.update_dropdowns();
            println!("{}", outcome.message());
        }
        "class" => type_into(&mut app.class_input, arg),
        "class!" => confirm(&mut app.class_input),
        "subject" => type_into(&mut app.subject_input, arg),
        "subject!" => confirm(&mut app.subject_input),
        "clear" => {
            app.class_input.clear();
            app.subject_input.clear();
        }
        "search" => {
            let class = chosen(&app.class_input);
            let subject = chosen(&app.subject_input);
            let questions = app.question_service.search(class, subject).await?;
            if !matches!(app.workflow.state(), QuizState::SelectingMode | QuizState::BrowsingSets(_)) {
                app.workflow.reset();
            }
            app.workflow.load_questions(&questions)?;
            print_sets(app);
        }
        "sets" => print_sets(app),
        "filter" => {
            let (class, subject) = arg.split_once('/').unwrap_or((arg, ""));
            let shown = app
                .workflow
                .filter_sets(Some(class.trim()), Some(subject.trim()))?;
            println!("{} sets match.", shown);
            print_sets(app);
        }
        "pick" => {
            let Some(index) = parse_number(arg) else {
                println!("Expected a set number, got '{}'", arg);
                return Ok(());
            };
            let set = app.workflow.select_set(index)?;
            println!("Selected: {}", set.title());
            for (i, q) in set.questions.iter().enumerate() {
                println!("  {}. {}", i + 1, q.question_text);
            }
        }
        "start" => {
            let session = app.workflow.start()?;
            print_question(session);
        }
        "answer" => {
            let Some(choice) = parse_number(arg) else {
                println!("Expected an option number, got '{}'", arg);
                return Ok(());
            };
            app.workflow.record_answer(choice)?;
            if let Some(session) = app.workflow.session() {
                print_question(session);
            }
        }
        "next" | "prev" => {
            if command == "next" {
                app.workflow.next()?;
            } else {
                app.workflow.previous()?;
            }
            if let Some(session) = app.workflow.session() {
                print_question(session);
            }
        }
        "submit" => {
            let report = app.workflow.submit()?;
            print_report(report);
        }
        "back" => {
            app.workflow.back_to_sets()?;
            print_sets(app);
        }
        other => println!("Unknown command '{}'. Type 'help'.", other),
    }
    Ok(())
}

fn type_into(input: &mut SearchInput, text: &str) {
    input.set_text(text);
    println!("Suggestions: {}", input.suggestions().join(", "));
}

fn confirm(input: &mut SearchInput) {
    match input.confirm() {
        Some(value) => println!("Selected '{}'", value),
        None => println!("No matching suggestion."),
    }
}

fn chosen(input: &SearchInput) -> Option<&str> {
    input.selected()
}

/// One-based input to zero-based index.
fn parse_number(arg: &str) -> Option<usize> {
    arg.parse::<usize>().ok()?.checked_sub(1)
}

fn print_sets(app: &AppState) {
    match app.workflow.browser() {
        Some(browser) => {
            for (i, set) in browser.visible_sets() {
                let marker = if browser.selected().map(|s| s.key()) == Some(set.key()) {
                    "*"
                } else {
                    " "
                };
                println!("{} {}. {}", marker, i + 1, set.title());
            }
        }
        None => println!("No question sets yet. Use 'search'."),
    }
}

fn print_question(session: &QuizSession) {
    let question = session.current_question();
    println!("{}", session.progress());
    println!("{}", question.question_text);
    let selected = session.selected_choice();
    for (i, choice) in question.choices.iter().enumerate() {
        let marker = if selected == Some(i) { "(x)" } else { "( )" };
        println!("  {} {}. {}", marker, i + 1, choice.text);
    }
}

fn print_report(report: &ScoreReport) {
    println!(
        "You answered {} correctly! ({:.0}%)",
        report.summary(),
        report.percentage()
    );
    for graded in report.graded.iter().filter(|g| !g.is_correct) {
        println!(
            "  Q{}: you chose '{}', correct was '{}'",
            graded.index + 1,
            graded.candidate_answer,
            graded.correct_answer.as_deref().unwrap_or("-")
        );
        if !graded.explanation.is_empty() {
            println!("     {}", graded.explanation);
        }
    }
}
