//! Void Crusade - Entry Point
//!
//! Interactive game-master console for running a campaign: advance turns,
//! inspect the galaxy, make purchases, fire stratagems, spawn events, and
//! save or load the session.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;

use void_crusade::campaign::snapshot::{load_campaign, save_campaign};
use void_crusade::campaign::{CampaignState, GalacticOrder, OrderGoal, TurnOrchestrator};
use void_crusade::core::config::CampaignConfig;
use void_crusade::core::error::Result;
use void_crusade::core::types::{FactionId, PlanetId, ResourceId};
use void_crusade::economy::{ItemCatalog, ResourceCatalog, TransactionEngine};
use void_crusade::events::{EventKind, INFINITE_DURATION};
use void_crusade::galaxy::connectivity;
use void_crusade::galaxy::planet::PlanetType;

/// Game-master console for a galactic campaign
#[derive(Parser, Debug)]
#[command(name = "void-crusade")]
#[command(about = "Run a tabletop campaign's galaxy from the terminal")]
struct Args {
    /// Random seed for reproducible event generation
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Optional TOML config overriding the default tunables
    #[arg(long)]
    config: Option<PathBuf>,

    /// Resume a previously saved campaign
    #[arg(long)]
    load: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("void_crusade=info")
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => CampaignConfig::load(path)?,
        None => CampaignConfig::default(),
    };
    if let Err(problem) = config.validate() {
        eprintln!("Invalid config: {problem}");
        std::process::exit(1);
    }

    let mut state = match &args.load {
        Some(path) => load_campaign(path)?,
        None => demo_campaign(&config),
    };
    let mut orchestrator = TurnOrchestrator::new(config, args.seed);
    let mut engine = TransactionEngine::new(ItemCatalog::with_defaults());
    let resources = ResourceCatalog::with_defaults();

    println!("\n=== VOID CRUSADE ===");
    println!("Galactic campaign tracker");
    println!();
    print_help();

    loop {
        print!("[turn {}] > ", state.turn);
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        let parts: Vec<&str> = input.split_whitespace().collect();
        match parts[0] {
            "quit" | "q" => break,
            "help" | "h" => print_help(),
            "turn" | "t" => {
                let summary = orchestrator.advance_turn(&mut state);
                print_summary(&summary);
            }
            "run" => match parts.get(1).and_then(|n| n.parse::<u32>().ok()) {
                Some(n) => {
                    for _ in 0..n {
                        let summary = orchestrator.advance_turn(&mut state);
                        print_summary(&summary);
                    }
                }
                None => println!("Usage: run <turns>"),
            },
            "status" | "s" => print_status(&state),
            "planets" => print_planets(&state),
            "events" => print_events(&state),
            "fleet" => print_fleet(&state),
            "shop" => print_shop(&engine),
            "wallet" => match parse_faction(&parts, 1) {
                Some(faction) => print_wallet(&state, &resources, faction),
                None => println!("Usage: wallet <faction-id>"),
            },
            "loot" => handle_loot(&mut state, &parts),
            "buy" => handle_buy(&mut state, &mut engine, &parts),
            "link" => handle_link(&mut state, &mut engine, &parts),
            "strat" => handle_stratagem(&mut state, &mut engine, &parts),
            "connect" => handle_connect(&mut state, &parts),
            "targets" => match parse_planet(&parts, 1) {
                Some(planet) => {
                    let targets =
                        connectivity::valid_move_targets(&state.planets, &state.events, planet);
                    let mut ids: Vec<_> = targets.into_iter().collect();
                    ids.sort_by_key(|p| p.0);
                    println!("Valid moves from {planet}: {ids:?}");
                }
                None => println!("Usage: targets <planet-id>"),
            },
            "event" => handle_event(&mut state, &parts),
            "order" => handle_order(&mut state, &parts),
            "save" => match parts.get(1) {
                Some(path) => match save_campaign(std::path::Path::new(path), &state) {
                    Ok(()) => println!("Saved to {path}"),
                    Err(problem) => println!("Save failed: {problem}"),
                },
                None => println!("Usage: save <path>"),
            },
            "load" => match parts.get(1) {
                Some(path) => match load_campaign(std::path::Path::new(path)) {
                    Ok(loaded) => {
                        state = loaded;
                        println!("Loaded campaign at turn {}", state.turn);
                    }
                    Err(problem) => println!("Load failed: {problem}"),
                },
                None => println!("Usage: load <path>"),
            },
            other => println!("Unknown command '{other}' (try 'help')"),
        }
    }

    println!("The crusade rests.");
    Ok(())
}

/// A small two-faction starting galaxy for new sessions
fn demo_campaign(config: &CampaignConfig) -> CampaignState {
    let mut state = CampaignState::new();

    let imperium = state.factions.add_faction("Astral Imperium");
    let reavers = state.factions.add_faction("Void Reavers");

    let throne = state.planets.add_planet("Throneheld", PlanetType::Hive);
    let anvil = state.planets.add_planet("Anvil's Rest", PlanetType::Forge);
    let granary = state.planets.add_planet("Granary", PlanetType::Agri);
    let lode = state.planets.add_planet("Deep Lode", PlanetType::Mining);
    let redoubt = state.planets.add_planet("Redoubt", PlanetType::Fortress);
    let shadow = state.planets.add_planet("Shadow Verge", PlanetType::Cursed);

    for (planet, owner) in [
        (throne, imperium),
        (anvil, imperium),
        (granary, reavers),
        (lode, reavers),
    ] {
        if let Some(p) = state.planets.get_mut(planet) {
            p.set_owner(Some(owner));
            p.set_defence(2);
            p.set_production(2);
        }
    }

    for (a, b) in [
        (throne, anvil),
        (throne, redoubt),
        (anvil, lode),
        (granary, lode),
        (granary, shadow),
        (redoubt, shadow),
    ] {
        let _ = connectivity::toggle_connection(&mut state.planets, a, b);
    }

    for faction in [imperium, reavers] {
        state.wallet.credit(
            faction,
            &ResourceId::from("requisition"),
            config.starting_requisition,
        );
        state.wallet.credit(
            faction,
            &ResourceId::from("materiel"),
            config.starting_materiel,
        );
    }

    tracing::info!("Demo campaign created: 6 planets, 2 factions");
    state
}

fn print_help() {
    println!("Commands:");
    println!("  turn / t                    - Advance the campaign one turn");
    println!("  run <n>                     - Advance n turns");
    println!("  status / s                  - Campaign overview");
    println!("  planets / events / fleet    - Inspect the galaxy");
    println!("  shop                        - List items and stratagems");
    println!("  wallet <faction>            - Faction balances");
    println!("  loot <planet> <res> <n>     - Adjust a planet's stockpile");
    println!("  buy <faction> <item> [planet]");
    println!("  link <faction> <item> <p1> <p2>  - Complete a two-phase purchase");
    println!("  strat <faction> <id> [planet]");
    println!("  connect <a> <b>             - Toggle a travel lane");
    println!("  targets <planet>            - Valid single moves from a planet");
    println!("  event <kind> <planet> <duration|inf> [delay] [target]");
    println!("  order claim|muster <target> <turns>");
    println!("  save <path> / load <path>");
    println!("  quit / q");
}

fn print_summary(summary: &void_crusade::campaign::TurnSummary) {
    println!("-- Turn {} --", summary.turn);
    for event in &summary.expired_events {
        println!("  Event expired: {:?} at {}", event.kind, event.planet);
    }
    for planet in &summary.razed_planets {
        println!("  DESTROYED: {planet}");
    }
    for harvest in &summary.harvests {
        let yields: Vec<String> = harvest
            .yields
            .iter()
            .map(|(r, a)| format!("{a} {r}"))
            .collect();
        println!(
            "  {} harvests {} from {}",
            harvest.faction,
            yields.join(", "),
            harvest.planet
        );
    }
    if let Some(outcome) = &summary.order_outcome {
        println!("  Order '{}' resolved: {:?}", outcome.name, outcome.status);
    }
    if summary.random_event.is_some() {
        println!("  A new event stirs in the warp...");
    }
}

fn print_status(state: &CampaignState) {
    println!("Turn {}", state.turn);
    println!(
        "{} planets ({} claimed), {} factions, {} ships, {} events",
        state.planets.planets().len(),
        state.planets.claimed_count(),
        state.factions.factions().len(),
        state.fleet.ships().len(),
        state.events.len()
    );
    match &state.order {
        Some(order) => println!(
            "Order '{}': {}/{} with {} turns left",
            order.name,
            order.progress,
            order.goal.target(),
            order.turns_remaining
        ),
        None => println!("No active galactic order"),
    }
}

fn print_planets(state: &CampaignState) {
    for planet in state.planets.planets() {
        let owner = planet
            .owner
            .and_then(|f| state.factions.get(f))
            .map(|f| f.name.as_str())
            .unwrap_or("unclaimed");
        println!(
            "  {} {} [{:?}] owner: {} def: {} prod: {} links: {:?}",
            planet.id,
            planet.name,
            planet.planet_type,
            owner,
            planet.defence(),
            planet.production(),
            planet.connections
        );
    }
}

fn print_events(state: &CampaignState) {
    if state.events.is_empty() {
        println!("  The warp is calm.");
        return;
    }
    for event in state.events.events() {
        let phase = if event.is_waiting() {
            format!("in {} turns", event.start_turn)
        } else if event.is_infinite() {
            "permanent".to_string()
        } else {
            format!("{} turns left", event.turns_remaining)
        };
        let target = event
            .target_planet
            .map(|t| format!(" -> {t}"))
            .unwrap_or_default();
        println!(
            "  {:?} at {}{} ({:?}, {})",
            event.kind, event.planet, target, event.effect, phase
        );
    }
}

fn print_fleet(state: &CampaignState) {
    if state.fleet.ships().is_empty() {
        println!("  No ships in service.");
        return;
    }
    for ship in state.fleet.ships() {
        println!(
            "  {:?} '{}' ({}) at {}",
            ship.id, ship.name, ship.faction, ship.station
        );
    }
}

fn print_shop(engine: &TransactionEngine) {
    println!("Items:");
    for item in engine.catalog().items() {
        println!("  {} - {} {}", item.id, item.name, format_cost(&item.cost));
    }
    println!("Stratagems:");
    for stratagem in engine.catalog().stratagems() {
        println!(
            "  {} - {} {} (cooldown {})",
            stratagem.id,
            stratagem.name,
            format_cost(&stratagem.cost),
            stratagem.cooldown
        );
    }
}

fn format_cost(cost: &[(ResourceId, i64)]) -> String {
    if cost.is_empty() {
        return "(free)".to_string();
    }
    let parts: Vec<String> = cost.iter().map(|(r, a)| format!("{a} {r}")).collect();
    format!("({})", parts.join(", "))
}

fn print_wallet(state: &CampaignState, resources: &ResourceCatalog, faction: FactionId) {
    match state.factions.get(faction) {
        Some(info) => {
            println!("{}:", info.name);
            for resource in resources.resources() {
                println!(
                    "  {}: {}",
                    resource.name,
                    state.wallet.get(faction, &resource.id)
                );
            }
            // Custom resources outside the standard catalog
            let mut extras = state.wallet.balances_for(faction);
            extras.sort_by(|(a, _), (b, _)| a.as_str().cmp(b.as_str()));
            for (resource, amount) in extras {
                if !resources.contains(resource) {
                    println!("  {resource}: {amount}");
                }
            }
        }
        None => println!("No such faction {faction}"),
    }
}

fn handle_loot(state: &mut CampaignState, parts: &[&str]) {
    let (Some(planet), Some(resource), Some(amount)) = (
        parse_planet(parts, 1),
        parts.get(2),
        parts.get(3).and_then(|a| a.parse::<i64>().ok()),
    ) else {
        println!("Usage: loot <planet> <resource> <amount>");
        return;
    };
    match state.planets.get_mut(planet) {
        Some(p) => {
            *p.resources.entry(ResourceId::from(*resource)).or_insert(0) += amount;
            println!("Stockpile on {planet}: {:?}", p.resources);
        }
        None => println!("No such planet {planet}"),
    }
}

fn handle_buy(state: &mut CampaignState, engine: &mut TransactionEngine, parts: &[&str]) {
    let (Some(faction), Some(item)) = (parse_faction(parts, 1), parts.get(2)) else {
        println!("Usage: buy <faction> <item> [planet]");
        return;
    };
    let target = parse_planet(parts, 3);
    match engine.purchase(&mut state.economy_ctx(), faction, item, target) {
        Ok(receipt) => {
            println!("{}", receipt.message);
            if receipt.requires_second_planet {
                println!("  (complete with: link {} {} <first> <second>)", faction.0, item);
            }
        }
        Err(problem) => println!("Rejected: {problem}"),
    }
}

fn handle_link(state: &mut CampaignState, engine: &mut TransactionEngine, parts: &[&str]) {
    let (Some(faction), Some(item), Some(p1), Some(p2)) = (
        parse_faction(parts, 1),
        parts.get(2),
        parse_planet(parts, 3),
        parse_planet(parts, 4),
    ) else {
        println!("Usage: link <faction> <item> <planet1> <planet2>");
        return;
    };
    match engine.complete_two_planet_purchase(&mut state.economy_ctx(), faction, item, p1, p2) {
        Ok(receipt) => println!("{}", receipt.message),
        Err(problem) => println!("Rejected: {problem}"),
    }
}

fn handle_stratagem(state: &mut CampaignState, engine: &mut TransactionEngine, parts: &[&str]) {
    let (Some(faction), Some(stratagem)) = (parse_faction(parts, 1), parts.get(2)) else {
        println!("Usage: strat <faction> <stratagem> [planet]");
        return;
    };
    let target = parse_planet(parts, 3);
    match engine.use_stratagem(&mut state.economy_ctx(), faction, stratagem, target) {
        Ok(receipt) => println!("{}", receipt.message),
        Err(problem) => println!("Rejected: {problem}"),
    }
}

fn handle_connect(state: &mut CampaignState, parts: &[&str]) {
    let (Some(a), Some(b)) = (parse_planet(parts, 1), parse_planet(parts, 2)) else {
        println!("Usage: connect <planet-a> <planet-b>");
        return;
    };
    match connectivity::toggle_connection(&mut state.planets, a, b) {
        Ok(change) => println!("Connection {a} <-> {b}: {change:?}"),
        Err(problem) => println!("Rejected: {problem}"),
    }
}

fn handle_event(state: &mut CampaignState, parts: &[&str]) {
    let (Some(kind), Some(planet), Some(duration)) = (
        parts.get(1).and_then(|k| parse_kind(k)),
        parse_planet(parts, 2),
        parts.get(3).and_then(|d| {
            if *d == "inf" {
                Some(INFINITE_DURATION)
            } else {
                d.parse::<i32>().ok().filter(|d| *d > 0)
            }
        }),
    ) else {
        println!("Usage: event <kind> <planet> <duration|inf> [delay] [target]");
        println!("Kinds: storm, wormhole, windfall, plague, supernova, waaagh, stc, crusade");
        return;
    };
    let delay = parts
        .get(4)
        .and_then(|s| s.parse::<i32>().ok())
        .unwrap_or(0);
    let target = parse_planet(parts, 5);

    if !state.planets.contains(planet) {
        println!("No such planet {planet}");
        return;
    }
    if kind == EventKind::Wormhole && target.is_none() {
        println!("Wormholes need a target planet");
        return;
    }

    let id = state.events.add(kind, planet, duration, delay, target);
    println!("Event {:?} created ({:?})", kind, id);
}

fn handle_order(state: &mut CampaignState, parts: &[&str]) {
    if state.order.is_some() {
        println!("An order is already active; let it resolve first.");
        return;
    }
    let (Some(goal_kind), Some(target), Some(turns)) = (
        parts.get(1),
        parts.get(2).and_then(|t| t.parse::<u32>().ok()),
        parts.get(3).and_then(|t| t.parse::<u32>().ok()),
    ) else {
        println!("Usage: order claim|muster <target> <turns>");
        return;
    };
    if turns == 0 {
        println!("An order needs at least one turn.");
        return;
    }

    let (name, goal) = match *goal_kind {
        "claim" => ("Claim the Stars", OrderGoal::ClaimPlanets { target }),
        "muster" => ("Muster the Fleets", OrderGoal::MusterFleets { target }),
        _ => {
            println!("Unknown order goal '{goal_kind}'");
            return;
        }
    };
    state.order = Some(GalacticOrder::new(
        name,
        goal,
        turns,
        vec![(ResourceId::from("requisition"), 5)],
    ));
    println!("Galactic order issued: {name} ({target} in {turns} turns)");
}

fn parse_faction(parts: &[&str], idx: usize) -> Option<FactionId> {
    parts.get(idx).and_then(|s| s.parse::<u32>().ok()).map(FactionId)
}

fn parse_planet(parts: &[&str], idx: usize) -> Option<PlanetId> {
    parts.get(idx).and_then(|s| s.parse::<u32>().ok()).map(PlanetId)
}

fn parse_kind(token: &str) -> Option<EventKind> {
    match token {
        "storm" => Some(EventKind::WarpStorm),
        "wormhole" => Some(EventKind::Wormhole),
        "windfall" => Some(EventKind::ResourceWindfall),
        "plague" => Some(EventKind::Plague),
        "supernova" => Some(EventKind::Supernova),
        "waaagh" => Some(EventKind::WaaaghMuster),
        "stc" => Some(EventKind::StcFragment),
        "crusade" => Some(EventKind::CrusadeCall),
        "custom" => Some(EventKind::Custom),
        _ => None,
    }
}
