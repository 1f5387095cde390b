//! Terminal demonstration: runs a full mission against a freshly generated
//! simulated maze and renders the mouse's own map as it learns it.

use std::io::{Stdout, Write};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode},
    queue,
    style::{self, Attribute, Color, Stylize},
    terminal::{self, ClearType},
    ExecutableCommand,
};
use unicode_truncate::UnicodeTruncateStr;
use unicode_width::UnicodeWidthStr;

use micromouse_nav::{
    coord::{Coord, GoalSet, Heading},
    maze_map::MazeMap,
    mission::{Mission, MissionState},
    pose::Pose,
    sim::{self, GenerationAlgorithm, SimulatedActuator, SimulatedPerception},
};

const N: usize = 9;
const CAP: usize = N * N;
const TICK: std::time::Duration = std::time::Duration::from_millis(60);

fn init_tracing() -> tracing_appender::non_blocking::WorkerGuard {
    let file_appender = tracing_appender::rolling::daily("logs", "micromouse-demo.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(writer)
        .with_ansi(false)
        .init();
    guard
}

fn set_panic_hook() {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal(&mut std::io::stdout());
        hook(panic_info);
        std::process::exit(1);
    }));
}

fn setup_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
    terminal::enable_raw_mode()?;
    set_panic_hook();
    queue!(
        stdout,
        terminal::EnterAlternateScreen,
        terminal::Clear(ClearType::All),
        cursor::Hide,
        cursor::MoveTo(0, 0),
    )?;
    stdout.flush()
}

fn restore_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
    queue!(stdout, terminal::LeaveAlternateScreen, cursor::Show)?;
    stdout.flush()?;
    terminal::disable_raw_mode()
}

/// Renders the mouse's current map knowledge as a grid of cells bordered by
/// whatever walls have been sensed so far (or are the fixed outer boundary).
/// A wall between two cells is drawn as soon as *either* side has recorded
/// it, since during exploration only the visited side is necessarily
/// accurate yet.
fn render(stdout: &mut Stdout, map: &MazeMap<N>, pose: Pose, goals: &GoalSet) -> std::io::Result<()> {
    queue!(stdout, cursor::MoveTo(0, 0))?;

    let wall_between = |a: Coord, heading: Heading| -> bool {
        if map.wall_between(a, heading) {
            return true;
        }
        a.neighbor(heading)
            .filter(|&b| map.is_in_range(b))
            .is_some_and(|b| map.wall_between(b, heading.opposite()))
    };

    let mut top_border = String::from("+");
    for _ in 0..N {
        top_border.push_str("--+");
    }
    queue!(stdout, style::Print(&top_border), cursor::MoveToNextLine(1))?;

    for y in (0..N as u8).rev() {
        queue!(stdout, style::Print("|"))?;
        for x in 0..N as u8 {
            let c = Coord::new(x, y);
            let glyph = if pose.coord == c {
                " M".with(Color::Yellow)
            } else if goals.contains(c) {
                " G".with(Color::Red)
            } else if c == Coord::new(0, 0) {
                " S".with(Color::Green)
            } else if map.visited(c) {
                " .".with(Color::DarkGrey)
            } else {
                "  ".with(Color::Reset)
            };
            stdout.execute(style::PrintStyledContent(glyph))?;
            let east_boundary = x as usize + 1 == N || wall_between(c, Heading::East);
            queue!(stdout, style::Print(if east_boundary { "|" } else { " " }))?;
        }
        queue!(stdout, cursor::MoveToNextLine(1))?;

        let mut wall_line = String::from("+");
        for x in 0..N as u8 {
            let c = Coord::new(x, y);
            let south_boundary = y == 0 || wall_between(c, Heading::South);
            wall_line.push_str(if south_boundary { "--" } else { "  " });
            wall_line.push('+');
        }
        queue!(stdout, style::Print(&wall_line), cursor::MoveToNextLine(1))?;
    }
    stdout.flush()
}

fn phase_name(state: MissionState) -> &'static str {
    match state {
        MissionState::FirstTraversal => "first traversal",
        MissionState::BackToStart => "back to start",
        MissionState::RunToGoal => "speed run",
        MissionState::Finished => "finished",
    }
}

fn log_status(stdout: &mut Stdout, row: u16, state: MissionState, iterations: u64) -> std::io::Result<()> {
    let term_width = terminal::size()?.0 as usize;
    let content = format!("phase: {}  iterations: {iterations}  (press q to quit)", phase_name(state));
    queue!(
        stdout,
        cursor::MoveTo(0, row),
        terminal::Clear(ClearType::CurrentLine),
    )?;
    if content.width() > term_width {
        let (truncated, printed_width) = content.unicode_truncate(term_width.saturating_sub(1));
        stdout.execute(style::PrintStyledContent(truncated.bold()))?;
        if term_width - printed_width >= 1 {
            stdout.execute(style::PrintStyledContent("~".stylize()))?;
        }
    } else {
        stdout.execute(style::PrintStyledContent(content.with(Color::White).attribute(Attribute::Bold)))?;
    }
    stdout.flush()
}

fn quit_requested() -> std::io::Result<bool> {
    if !event::poll(std::time::Duration::from_millis(0))? {
        return Ok(false);
    }
    if let Event::Key(key) = event::read()? {
        return Ok(matches!(key.code, KeyCode::Char('q') | KeyCode::Esc));
    }
    Ok(false)
}

fn main() -> std::io::Result<()> {
    let _guard = init_tracing();

    let seed = std::env::args().nth(1).and_then(|s| s.parse::<u64>().ok());
    let truth: MazeMap<N> = sim::generate(GenerationAlgorithm::RecursiveBacktrack, seed);
    let goals = GoalSet::center::<N>();
    let mut mission: Mission<N, CAP> = Mission::new();
    let mut actuator = SimulatedActuator;

    let mut stdout = std::io::stdout();
    setup_terminal(&mut stdout)?;

    let run = (|| -> std::io::Result<()> {
        let mut iterations: u64 = 0;
        while !mission.is_finished() {
            if quit_requested()? {
                break;
            }
            let pose = mission.pose();
            let mut perception = SimulatedPerception::new(&truth, pose.coord, pose.heading);
            mission
                .iterate(&mut actuator, &mut perception)
                .expect("navigation invariant violated against a freshly generated simulated maze");
            iterations += 1;

            render(&mut stdout, mission.map(), mission.pose(), &goals)?;
            log_status(&mut stdout, N as u16 * 2 + 2, mission.state(), iterations)?;
            std::thread::sleep(TICK);
        }
        Ok(())
    })();

    restore_terminal(&mut stdout)?;
    run
}
