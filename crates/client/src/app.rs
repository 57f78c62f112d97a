//! One headless day: explore, optionally talk, eat, sleep, save.

use anyhow::{Context, Result};
use hiker_content::ContentFactory;
use hiker_core::{DialogueError, FoodKind, ItemCategory, PlayerProfile, RunStatus, Step};
use hiker_runtime::{
    FileSaveRepository, GameRng, GameSession, RuntimeConfig, STEP_COST, SaveRepository,
    SessionError, rng,
};

use crate::Cli;

/// Upper bound on dialogue choices made in one conversation.
const MAX_CHOICES: usize = 12;

pub struct HeadlessDay {
    config: RuntimeConfig,
    cli: Cli,
}

impl HeadlessDay {
    pub fn new(config: RuntimeConfig, cli: Cli) -> Self {
        Self { config, cli }
    }

    pub fn run(self) -> Result<()> {
        let mut session = self.open_session()?;

        println!(
            "{} - day {} ({} {}), stamina {:.1}/{:.1}",
            session.state().player.name,
            session.state().day,
            session.state().season,
            session.state().day_in_season,
            session.state().stamina.current,
            session.effective_stamina_cap(),
        );

        self.explore(&mut session)?;

        if let Some(npc) = self.cli.talk.as_deref() {
            converse(&mut session, npc)?;
        }

        if session.state().status == RunStatus::Active {
            eat_something(&mut session)?;
            let status = session.end_day()?;
            println!("You sleep. Status: {status:?}");
        }

        session.save().context("failed to save the run")?;
        tracing::info!(slot = session.slot(), day = session.state().day, "day complete");
        Ok(())
    }

    fn open_session(&self) -> Result<GameSession> {
        let factory = ContentFactory::new(self.config.data_dir.clone());
        let (catalog, game_config) = factory.load().with_context(|| {
            format!("failed to load content from {}", factory.data_dir().display())
        })?;

        let repository = FileSaveRepository::new(&self.config.save_dir)
            .with_context(|| format!("failed to open {}", self.config.save_dir.display()))?;
        let (rng, _seed) = rng::seeded(self.config.seed);
        let slot = self.config.save_slot.clone();

        if !self.cli.new && repository.exists(&slot) {
            return GameSession::<GameRng>::resume(
                catalog,
                game_config,
                rng,
                Box::new(repository),
                slot,
            )?
            .context("save slot emptied while resuming");
        }

        let player = PlayerProfile {
            name: self.cli.name.clone(),
            race: self.cli.race.clone(),
        };
        tracing::info!(slot = %slot, player = %player.name, "new run");
        Ok(GameSession::new_game(
            catalog,
            game_config,
            player,
            rng,
            Box::new(repository),
            slot,
        ))
    }

    fn explore(&self, session: &mut GameSession) -> Result<()> {
        for _ in 0..self.cli.steps {
            if session.state().status != RunStatus::Active {
                break;
            }
            if session.state().stamina.current < STEP_COST {
                println!("Too tired to go on.");
                break;
            }

            match session.explore_step(self.cli.depth) {
                Ok(outcome) => println!("[{}] {}", outcome.category, outcome.text),
                Err(SessionError::Select(err)) => {
                    tracing::warn!(depth = self.cli.depth, %err, "nothing happens here");
                    break;
                }
                Err(err) => return Err(err.into()),
            }
        }
        Ok(())
    }
}

/// Walks a conversation by taking the first option that the player can
/// afford.
fn converse(session: &mut GameSession, npc: &str) -> Result<()> {
    let mut view = session.talk(npc)?;

    for _ in 0..MAX_CHOICES {
        println!("{}", view.text);
        if view.is_terminal() {
            break;
        }

        let mut next = None;
        for option in &view.options {
            println!("  > {}", option.text);
            match session.choose(option.index) {
                Ok(step) => {
                    next = Some(step);
                    break;
                }
                Err(SessionError::Dialogue(DialogueError::UnmetRequirement { .. })) => continue,
                Err(err) => return Err(err.into()),
            }
        }

        match next {
            Some(Step::Node(node)) => view = node,
            Some(Step::Ended { reason, .. }) => {
                tracing::debug!(?reason, "conversation over");
                break;
            }
            None => break,
        }
    }
    Ok(())
}

/// Eats the first carried food item as a meal, if any.
fn eat_something(session: &mut GameSession) -> Result<()> {
    let food = session
        .catalog()
        .items()
        .iter()
        .filter(|item| item.category == ItemCategory::Food)
        .find(|item| session.state().inventory.count(&item.id) > 0)
        .map(|item| item.id.clone());

    if let Some(food) = food {
        session.eat(&food, FoodKind::Meal)?;
        println!("You eat some {food}.");
    }
    Ok(())
}
