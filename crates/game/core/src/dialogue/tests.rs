use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::*;
use crate::condition::{Condition, RapportRequirement};
use crate::config::GameConfig;
use crate::engine::GameEngine;
use crate::env::NpcDefinition;
use crate::rapport::RapportTier;
use crate::state::{GameState, PlayerProfile};

fn option(text: &str, next: Option<&str>) -> DialogueOption {
    DialogueOption {
        text: text.into(),
        next_node_id: next.map(Into::into),
        ..DialogueOption::default()
    }
}

fn requires_flag(flag: &str) -> Option<Condition> {
    Some(Condition {
        require_flags: vec![flag.into()],
        ..Condition::default()
    })
}

fn node(id: &str, text: &str, condition: Option<Condition>, options: Vec<DialogueOption>) -> DialogueNode {
    DialogueNode {
        id: id.into(),
        npc_id: id.split('_').next().unwrap_or_default().into(),
        text: text.into(),
        condition,
        options,
    }
}

fn catalog() -> ContentCatalog {
    let start = node(
        "hermit_start",
        "{npc} eyes {player}.",
        None,
        vec![
            DialogueOption {
                rapport_delta: 1,
                set_flags: [("hermit.met".to_string(), true)].into_iter().collect(),
                ..option("Greet", Some("hermit_hub"))
            },
            DialogueOption {
                rapport_delta: 3,
                required_items: [("gold_pan".to_string(), 1)].into_iter().collect(),
                consumed_items: [("gold_pan".to_string(), 1)].into_iter().collect(),
                ..option("Offer the gold pan", Some("hermit_hub"))
            },
            DialogueOption {
                condition: requires_flag("secret.known"),
                ..option("Whisper the secret", None)
            },
            option("Leave", None),
        ],
    );
    let hub = node(
        "hermit_hub",
        "What now?",
        None,
        vec![
            DialogueOption {
                condition: Some(Condition {
                    rapport: Some(RapportRequirement {
                        min_tier: Some(RapportTier::Friendly),
                        ..RapportRequirement::default()
                    }),
                    ..Condition::default()
                }),
                ..option("Ask about the runes", Some("hermit_runes"))
            },
            option("Chat some more", Some("hermit_hub")),
            option("Knock on the cellar door", Some("hermit_cellar")),
            option("Bye", None),
        ],
    );

    ContentCatalog::builder()
        .npcs(vec![
            NpcDefinition {
                id: "hermit".into(),
                name: "Old Ash".into(),
                description: String::new(),
                landmark_ids: Vec::new(),
                tags: Vec::new(),
                start_nodes: vec!["hermit_return".into(), "hermit_start".into()],
                fallback_node: "hermit_fallback".into(),
            },
            NpcDefinition {
                id: "ghost".into(),
                name: "Pale Shape".into(),
                description: String::new(),
                landmark_ids: Vec::new(),
                tags: Vec::new(),
                start_nodes: vec!["ghost_start".into()],
                fallback_node: "ghost_fallback".into(),
            },
        ])
        .dialogue(vec![
            start,
            node(
                "hermit_return",
                "Back again?",
                requires_flag("hermit.met"),
                vec![option("Leave", None)],
            ),
            hub,
            node("hermit_runes", "The stones remember.", None, Vec::new()),
            node(
                "hermit_cellar",
                "A cold draft.",
                requires_flag("cellar.open"),
                vec![option("Back", Some("hermit_hub"))],
            ),
            node("hermit_fallback", "{npc} ignores you.", None, Vec::new()),
        ])
        .dialogue(vec![
            node(
                "ghost_start",
                "...",
                requires_flag("moon.full"),
                vec![option("Leave", None)],
            ),
            node("ghost_fallback", "Nothing stirs.", None, Vec::new()),
        ])
        .build()
        .unwrap()
}

struct Fixture {
    catalog: ContentCatalog,
    config: GameConfig,
    state: GameState,
    rng: ChaCha8Rng,
}

impl Fixture {
    fn new() -> Self {
        let config = GameConfig::default();
        let state = GameState::new(
            PlayerProfile {
                name: "Wren".into(),
                race: "human".into(),
            },
            &config,
        );
        Self {
            catalog: catalog(),
            config,
            state,
            rng: ChaCha8Rng::seed_from_u64(0),
        }
    }

    fn begin(&self, npc: &str) -> Result<DialogueSession, DialogueError> {
        DialogueEngine::new(&self.catalog).begin(npc, self.state.snapshot())
    }

    fn choose(&mut self, session: &mut DialogueSession, index: usize) -> Result<Step, DialogueError> {
        let mut engine = GameEngine::new(&mut self.state, &self.config, &mut self.rng);
        DialogueEngine::new(&self.catalog).choose(session, index, &mut engine)
    }
}

#[test]
fn start_node_is_reevaluated_each_encounter() {
    let mut fixture = Fixture::new();
    let session = fixture.begin("hermit").unwrap();
    assert_eq!(session.current_node(), Some("hermit_start"));

    fixture.state.flags.set("hermit.met", true);
    let session = fixture.begin("hermit").unwrap();
    assert_eq!(session.current_node(), Some("hermit_return"));
}

#[test]
fn gated_start_points_to_fallback() {
    let fixture = Fixture::new();
    let err = fixture.begin("ghost").unwrap_err();
    assert_eq!(
        err,
        DialogueError::NodeGatedOut {
            npc_id: "ghost".into(),
            node_id: "ghost_start".into(),
            fallback_node: "ghost_fallback".into(),
        }
    );

    let engine = DialogueEngine::new(&fixture.catalog);
    let session = engine
        .begin_at("ghost", "ghost_fallback", fixture.state.snapshot())
        .unwrap();
    let view = engine.view(&session, fixture.state.snapshot()).unwrap();
    assert!(view.is_terminal());
}

#[test]
fn view_renders_tokens_and_keeps_full_list_indices() {
    let fixture = Fixture::new();
    let session = fixture.begin("hermit").unwrap();
    let view = DialogueEngine::new(&fixture.catalog)
        .view(&session, fixture.state.snapshot())
        .unwrap();

    assert_eq!(view.text, "Old Ash eyes Wren.");
    let indices: Vec<_> = view.options.iter().map(|option| option.index).collect();
    assert_eq!(indices, vec![0, 1, 3]);
}

#[test]
fn gated_or_out_of_range_option_is_rejected_without_mutation() {
    let mut fixture = Fixture::new();
    let mut session = fixture.begin("hermit").unwrap();
    let before = fixture.state.clone();
    let session_before = session.clone();

    for index in [2, 9] {
        let err = fixture.choose(&mut session, index).unwrap_err();
        assert_eq!(
            err,
            DialogueError::InvalidOptionSelection {
                node_id: "hermit_start".into(),
                index,
            }
        );
    }
    assert_eq!(fixture.state, before);
    assert_eq!(session, session_before);
}

#[test]
fn missing_item_is_unmet_requirement() {
    let mut fixture = Fixture::new();
    let mut session = fixture.begin("hermit").unwrap();
    let before = fixture.state.clone();

    let err = fixture.choose(&mut session, 1).unwrap_err();
    assert_eq!(
        err,
        DialogueError::UnmetRequirement {
            item: "gold_pan".into(),
            required: 1,
            held: 0,
        }
    );
    assert_eq!(fixture.state.inventory, before.inventory);
    assert_eq!(fixture.state.rapport, before.rapport);
    assert_eq!(session.current_node(), Some("hermit_start"));
}

#[test]
fn item_option_consumes_and_transitions() {
    let mut fixture = Fixture::new();
    fixture.state.inventory.add("gold_pan", 1);
    let mut session = fixture.begin("hermit").unwrap();

    let step = fixture.choose(&mut session, 1).unwrap();
    assert!(matches!(step, Step::Node(ref view) if view.node_id == "hermit_hub"));
    assert_eq!(fixture.state.inventory.count("gold_pan"), 0);
    assert_eq!(fixture.state.snapshot().rapport("hermit"), 3);
}

#[test]
fn hub_cycles_and_rapport_unlocks_options() {
    let mut fixture = Fixture::new();
    let mut session = fixture.begin("hermit").unwrap();

    let Step::Node(view) = fixture.choose(&mut session, 0).unwrap() else {
        panic!("expected hub node");
    };
    assert!(view.options.iter().all(|option| option.index != 0));
    assert!(fixture.state.flags.get("hermit.met"));

    for _ in 0..3 {
        let step = fixture.choose(&mut session, 1).unwrap();
        assert!(matches!(step, Step::Node(ref view) if view.node_id == "hermit_hub"));
    }

    fixture.state.rapport.insert("hermit".into(), 5);
    let step = fixture.choose(&mut session, 0).unwrap();
    let Step::Ended { reason, last } = step else {
        panic!("expected terminal node");
    };
    assert_eq!(reason, EndReason::NoOptions);
    assert_eq!(last.map(|view| view.text).as_deref(), Some("The stones remember."));
    assert!(session.is_finished());

    // greet + hub, three loops, runes: 1 + 2 + 3 * 2 + 2
    assert_eq!(session.transcript().len(), 11);
    assert_eq!(
        fixture.choose(&mut session, 0).unwrap_err(),
        DialogueError::SessionFinished
    );
}

#[test]
fn gated_next_node_ends_the_conversation() {
    let mut fixture = Fixture::new();
    let mut session = fixture.begin("hermit").unwrap();
    fixture.choose(&mut session, 0).unwrap();

    let step = fixture.choose(&mut session, 2).unwrap();
    assert_eq!(
        step,
        Step::Ended {
            reason: EndReason::GatedOut {
                node_id: "hermit_cellar".into()
            },
            last: None,
        }
    );
    assert!(session.is_finished());
}

#[test]
fn exit_option_reaches_terminal() {
    let mut fixture = Fixture::new();
    let mut session = fixture.begin("hermit").unwrap();
    let step = fixture.choose(&mut session, 3).unwrap();
    assert_eq!(
        step,
        Step::Ended {
            reason: EndReason::Exit,
            last: None
        }
    );
}
