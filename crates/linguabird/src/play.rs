//! Line-oriented terminal driver for the session state machine.
//!
//! Each loop iteration prints the current phase, reads one line and turns
//! it into an intent. Rendering stays deliberately plain.

use std::str::FromStr;

use anyhow::Result;
use linguabird::{
    Difficulty, Exercise, Intent, Language, LessonProvider, LessonSummary, PartialStats, Phase,
    SessionError, SessionMachine,
};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::{info, instrument, warn};

type Input = Lines<BufReader<Stdin>>;

/// Runs until the learner quits or stdin closes.
#[instrument(skip_all)]
pub async fn run(mut machine: SessionMachine, provider: &dyn LessonProvider) -> Result<()> {
    let mut input = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print_header(&machine);
        let keep_going = match machine.phase().clone() {
            Phase::Start => start_screen(&mut machine, &mut input).await?,
            Phase::Onboarding => onboarding_screen(&mut machine, &mut input).await?,
            Phase::Dashboard { .. } => dashboard_screen(&mut machine, provider, &mut input).await?,
            Phase::Profile => profile_screen(&mut machine, &mut input).await?,
            Phase::Lesson(_) => lesson_screen(&mut machine, &mut input).await?,
            Phase::Completed(summary) => {
                completed_screen(&mut machine, &summary, &mut input).await?
            }
        };
        if !keep_going {
            info!("Play loop finished");
            return Ok(());
        }
    }
}

/// Prints a prompt and reads one trimmed line; `None` on end of input.
async fn prompt(input: &mut Input, text: &str) -> Result<Option<String>> {
    println!("{}", text);
    Ok(input.next_line().await?.map(|line| line.trim().to_string()))
}

/// Logs and shows a rejected intent.
fn report<T>(result: Result<T, SessionError>) {
    if let Err(e) = result {
        warn!(error = %e, "Intent rejected");
        println!("⚠ {}", e);
    }
}

fn print_header(machine: &SessionMachine) {
    let ledger = machine.ledger();
    println!();
    println!(
        "❤ {}  🔥 {}  🪙 {}  ⭐ {} XP  [{}]",
        ledger.hearts(),
        ledger.streak(),
        ledger.coins(),
        ledger.xp(),
        machine.phase_kind()
    );
    if machine.active_lesson().is_some() {
        println!("Progresso: {:.0}%", machine.progress_percent());
    }
}

async fn start_screen(machine: &mut SessionMachine, input: &mut Input) -> Result<bool> {
    println!("🦜 LinguaBird - Escute antes de falar. Entenda antes de traduzir.");
    let Some(_) = prompt(input, "[enter] começar").await? else {
        return Ok(false);
    };
    report(machine.apply(Intent::Begin));
    Ok(true)
}

async fn onboarding_screen(machine: &mut SessionMachine, input: &mut Input) -> Result<bool> {
    for language in Language::catalog() {
        println!("  {:<4}{}", language.code(), language);
    }
    let Some(code) = prompt(input, "Qual idioma? (código)").await? else {
        return Ok(false);
    };
    let Some(language) = Language::by_code(&code) else {
        println!("Idioma desconhecido: {}", code);
        return Ok(true);
    };
    let Some(name) = prompt(input, "Seu nome (opcional):").await? else {
        return Ok(false);
    };
    let Some(goal) = prompt(input, "Meta diária de XP (opcional):").await? else {
        return Ok(false);
    };

    let partial = PartialStats {
        name: (!name.is_empty()).then_some(name),
        goal: goal.parse().ok(),
        ..PartialStats::default()
    };
    report(machine.apply(Intent::CompleteOnboarding { language, partial }));
    Ok(true)
}

async fn dashboard_screen(
    machine: &mut SessionMachine,
    provider: &dyn LessonProvider,
    input: &mut Input,
) -> Result<bool> {
    let Some(language) = machine.language().cloned() else {
        // A dashboard without a language can only come from a bad save.
        report(machine.apply(Intent::ChangeLanguage));
        return Ok(true);
    };
    println!("Estudando {}", language);
    let Some(line) = prompt(
        input,
        "[l <facil|medio|dificil>] lição  [i] idioma  [p] perfil  [q] sair",
    )
    .await?
    else {
        return Ok(false);
    };

    let mut words = line.split_whitespace();
    match words.next() {
        Some("l") => {
            let word = words.next();
            let Some(difficulty) = lesson_difficulty(word) else {
                println!("Dificuldade desconhecida: {}", word.unwrap_or_default());
                return Ok(true);
            };
            println!("🦜🤓 O LinguaBird está lendo... Preparando sua trilha pedagógica.");
            report(machine.request_lesson(provider, language, difficulty).await);
        }
        Some("i") => report(machine.apply(Intent::ChangeLanguage)),
        Some("p") => report(machine.apply(Intent::OpenProfile)),
        Some("q") => return Ok(false),
        _ => println!("Comando desconhecido"),
    }
    Ok(true)
}

/// Difficulty named after `l`; none given means the default.
fn lesson_difficulty(word: Option<&str>) -> Option<Difficulty> {
    match word {
        None => Some(Difficulty::default()),
        Some(word) => Difficulty::from_str(word).ok(),
    }
}

async fn completed_screen(
    machine: &mut SessionMachine,
    summary: &LessonSummary,
    input: &mut Input,
) -> Result<bool> {
    println!("🏆 Você escutou, entendeu e falou!");
    println!(
        "+{} XP  +{} moedas  ({} de {} certas)",
        summary.xp_gained(),
        summary.coins_gained(),
        summary.correct(),
        summary.exercises()
    );
    let Some(_) = prompt(input, "[enter] voar de volta").await? else {
        return Ok(false);
    };
    report(machine.apply(Intent::ExitLesson));
    Ok(true)
}

async fn profile_screen(machine: &mut SessionMachine, input: &mut Input) -> Result<bool> {
    let ledger = machine.ledger().clone();
    println!(
        "Perfil: {}  nível {}  meta {}",
        ledger.name().as_deref().unwrap_or("(sem nome)"),
        ledger.current_level(),
        ledger.goal().map_or_else(|| "-".to_string(), |g| g.to_string())
    );
    let Some(line) = prompt(input, "[b] voltar  [r] recomeçar").await? else {
        return Ok(false);
    };
    match line.as_str() {
        "r" => report(machine.apply(Intent::Reset)),
        _ => report(machine.apply(Intent::CloseProfile)),
    }
    Ok(true)
}

async fn lesson_screen(machine: &mut SessionMachine, input: &mut Input) -> Result<bool> {
    if let Some(feedback) = machine.feedback().cloned() {
        println!(
            "{} {}",
            if *feedback.correct() { "✓" } else { "✗" },
            feedback.headline()
        );
        println!("{}", feedback.message());
        let Some(_) = prompt(input, "[enter] continuar").await? else {
            return Ok(false);
        };
        report(machine.apply(Intent::Continue));
        return Ok(true);
    }

    let Some(exercise) = machine.current_exercise().cloned() else {
        report(machine.apply(Intent::ExitLesson));
        return Ok(true);
    };
    println!("🦜 {}", machine.mascot_line());
    print_exercise(&exercise);

    let Some(line) = prompt(input, "Resposta ([x] sair da lição):").await? else {
        return Ok(false);
    };
    if line == "x" {
        report(machine.apply(Intent::ExitLesson));
        return Ok(true);
    }
    let correct = grade(&exercise, &line);
    report(machine.apply(Intent::SubmitAnswer { correct }));
    Ok(true)
}

fn print_exercise(exercise: &Exercise) {
    println!("[{}] {}", exercise.kind(), exercise.prompt());
    if let Some(context) = exercise.context() {
        println!("  ({})", context);
    }
    if let Some(audio) = exercise.audio_text() {
        println!("  🔊 {}", audio);
    }
    if let Some(options) = exercise.options() {
        for (i, option) in options.iter().enumerate() {
            println!("  {}. {}", i + 1, option);
        }
    }
}

/// Grades a typed answer.
///
/// A number picks an option. The pick, or the typed text, must match the
/// target text, or the audio text when there is no target. Exercises with
/// neither options nor anything to compare against count as done.
fn grade(exercise: &Exercise, answer: &str) -> bool {
    let expected = exercise
        .target_text()
        .as_deref()
        .or(exercise.audio_text().as_deref());
    let Some(expected) = expected else {
        return exercise.options().is_none();
    };
    let chosen = answer
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| exercise.options().as_ref()?.get(i).cloned())
        .unwrap_or_else(|| answer.to_string());
    chosen.trim().eq_ignore_ascii_case(expected.trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use linguabird::ExerciseType;

    fn listen_with_options() -> Exercise {
        Exercise::new("2", ExerciseType::Listen, "O que você ouviu?")
            .with_audio_text("merci")
            .with_options(vec!["obrigado".to_string(), "merci".to_string()])
    }

    #[test]
    fn options_without_target_compare_against_audio() {
        let exercise = listen_with_options();
        assert!(!grade(&exercise, "zzz"));
        assert!(!grade(&exercise, "1"));
        assert!(grade(&exercise, "2"));
        assert!(grade(&exercise, "Merci"));
    }

    #[test]
    fn options_with_nothing_to_match_are_wrong() {
        let exercise = Exercise::new("p", ExerciseType::Practice, "Escolha")
            .with_options(vec!["a".to_string(), "b".to_string()]);
        assert!(!grade(&exercise, "1"));
        assert!(!grade(&exercise, "a"));
    }

    #[test]
    fn target_text_wins_over_audio() {
        let exercise = listen_with_options().with_target_text("obrigado");
        assert!(grade(&exercise, "1"));
        assert!(!grade(&exercise, "2"));
    }

    #[test]
    fn misspelled_difficulty_is_not_replaced_by_default() {
        assert_eq!(lesson_difficulty(None), Some(Difficulty::Easy));
        assert_eq!(lesson_difficulty(Some("dificil")), Some(Difficulty::Hard));
        assert_eq!(lesson_difficulty(Some("dificl")), None);
    }

    #[test]
    fn plain_presentation_counts_as_done() {
        let exercise = Exercise::new("l", ExerciseType::Learn, "Observe: bonjour");
        assert!(grade(&exercise, ""));
    }
}
