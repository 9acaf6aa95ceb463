// goal.rs — Goal subcommands: add, record, list, score.

use anyhow::Context;
use clap::Subcommand;
use quest_goal::{GoalFile, GoalStore, GoalVariant};

#[derive(Subcommand)]
pub enum AddCommands {
    /// A one-shot goal that completes the first time it is recorded.
    Simple {
        /// Goal name (e.g., "Run a marathon").
        name: String,
        /// Points awarded when recorded.
        #[arg(long, allow_negative_numbers = true)]
        points: i64,
    },
    /// A goal that never completes and pays out every time.
    Eternal {
        /// Goal name (e.g., "Read scriptures").
        name: String,
        /// Points awarded per event.
        #[arg(long, allow_negative_numbers = true)]
        points: i64,
    },
    /// A goal that completes after a number of events, with a bonus.
    Checklist {
        /// Goal name (e.g., "Attend the temple").
        name: String,
        /// Points awarded per event.
        #[arg(long, allow_negative_numbers = true)]
        points: i64,
        /// Number of events needed to complete the goal.
        #[arg(long)]
        target: u32,
        /// Extra points awarded on the completing event.
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        bonus: i64,
    },
}

pub fn add(cmd: &AddCommands, file: &GoalFile) -> anyhow::Result<()> {
    let (name, points, variant) = match cmd {
        AddCommands::Simple { name, points } => (name, *points, GoalVariant::Simple),
        AddCommands::Eternal { name, points } => (name, *points, GoalVariant::Eternal),
        AddCommands::Checklist {
            name,
            points,
            target,
            bonus,
        } => (
            name,
            *points,
            GoalVariant::Checklist {
                target_count: *target,
                bonus: *bonus,
            },
        ),
    };

    let mut store = file.load()?;
    store.create_goal(name, points, variant)?;
    file.save(&store)?;

    println!("Created goal #{}: {}", store.len(), name);
    Ok(())
}

pub fn record(file: &GoalFile, position: usize) -> anyhow::Result<()> {
    let mut store = file.load()?;
    let index = position
        .checked_sub(1)
        .context("goal positions start at 1")?;
    let gained = store
        .record_event(index)
        .with_context(|| format!("no goal at position {}", position))?;
    file.save(&store)?;

    println!(
        "You gained {} points! Total Score: {}",
        gained,
        store.total_score()
    );
    Ok(())
}

pub fn list(file: &GoalFile, json: bool) -> anyhow::Result<()> {
    let store = file.load()?;
    if json {
        println!("{}", render_json(&store)?);
    } else {
        print!("{}", render_table(&store));
    }
    Ok(())
}

pub fn score(file: &GoalFile) -> anyhow::Result<()> {
    let store = file.load()?;
    println!("{}", store.total_score());
    Ok(())
}

fn render_table(store: &GoalStore) -> String {
    if store.is_empty() {
        return format!("No goals yet.\nTotal Score: {}\n", store.total_score());
    }

    let mut out = String::new();
    for (i, goal) in store.goals().iter().enumerate() {
        out.push_str(&format!("{:>3}. {}\n", i + 1, goal));
    }
    out.push_str(&format!("\nTotal Score: {}\n", store.total_score()));
    out
}

fn render_json(store: &GoalStore) -> anyhow::Result<String> {
    let value = serde_json::json!({
        "score": store.total_score(),
        "goals": store.list_goals(),
    });
    Ok(serde_json::to_string_pretty(&value)?)
}
