//! Danger Close - command-line companion
//!
//! Each invocation loads the roster and mission from the data directory,
//! applies one command and writes the result back.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use danger_close::command::{load_catalog, report, Command, Session};
use danger_close::core::config::TrackerConfig;
use danger_close::core::error::{Result, TrackerError};
use danger_close::core::types::TrooperId;
use danger_close::store::FileStore;

/// Roster and engagement tracker for Danger Close
#[derive(Parser, Debug)]
#[command(name = "danger-close")]
#[command(about = "Track troopers, gear and mission momentum")]
struct Args {
    /// Config file (TOML)
    #[arg(long, default_value = "danger-close.toml")]
    config: PathBuf,

    /// Override the data directory from the config
    #[arg(long)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Area,
}

#[derive(Subcommand, Debug)]
enum Area {
    /// Manage troopers
    #[command(subcommand)]
    Roster(RosterCmd),
    /// Track the engagement
    #[command(subcommand)]
    Mission(MissionCmd),
    /// List the equipment catalog
    Catalog,
}

#[derive(Subcommand, Debug)]
enum RosterCmd {
    /// List troopers
    List {
        /// Only deployed troopers
        #[arg(long)]
        active: bool,
    },
    /// Show one trooper
    Show { id: String },
    /// Recruit a new trooper
    Recruit,
    /// Remove a trooper
    Dismiss { id: String },
    /// Set a field (name, status, gritMax, gritCurrent, ammoCurrent, notes, ...)
    Set { id: String, field: String, value: String },
    /// Click a grit pip
    Grit { id: String, value: u32 },
    /// Click an ammo pip
    Ammo { id: String, value: u32 },
    /// Click an item counter pip
    Counter { id: String, counter: String, value: u32 },
    /// Put an item in a slot (armor, weapon, special); omit the item to clear
    Equip { id: String, slot: String, item: Option<String> },
    /// Remove one item
    Unequip { id: String, item: String },
    /// Toggle between deployed and reserve
    Deploy { id: String },
    /// Click an offensive position (Flanking, Engaged, Limited)
    Offense { id: String, position: String },
    /// Click a defensive position (Fortified, In Cover, Flanked)
    Defense { id: String, position: String },
}

#[derive(Subcommand, Debug)]
enum MissionCmd {
    /// Show the engagement header
    Show,
    /// Start a mission
    Start { threat_level: Option<u8> },
    /// End the mission and reset the tracker
    End,
    /// Set the threat level (1-4)
    Threat { threat_level: u8 },
    /// Set momentum (-3 to +5)
    Momentum {
        #[arg(allow_hyphen_values = true)]
        value: i32,
    },
    /// Shift momentum
    Adjust {
        #[arg(allow_hyphen_values = true)]
        delta: i32,
    },
    /// Set cover (0 Exposed, 1 Normal, 2 Dense)
    Cover { level: i64 },
    /// Set space (0 Tight, 1 Transitional, 2 Open)
    Space { level: i64 },
    /// Move the exchange counter: next, prev, reset or a number
    Exchange { step: String },
    /// Expand or collapse the header details
    Header,
}

fn roster_command(cmd: RosterCmd) -> Result<Option<Command>> {
    let command = match cmd {
        RosterCmd::List { .. } | RosterCmd::Show { .. } => return Ok(None),
        RosterCmd::Recruit => Command::Recruit,
        RosterCmd::Dismiss { id } => Command::Dismiss { id: id.into() },
        RosterCmd::Set { id, field, value } => Command::Update { id: id.into(), field, value },
        RosterCmd::Grit { id, value } => Command::SetGrit { id: id.into(), value },
        RosterCmd::Ammo { id, value } => Command::SetAmmo { id: id.into(), value },
        RosterCmd::Counter { id, counter, value } => Command::SetCounter {
            id: id.into(),
            counter,
            value,
        },
        RosterCmd::Equip { id, slot, item } => Command::Equip {
            id: id.into(),
            slot: slot.parse()?,
            item,
        },
        RosterCmd::Unequip { id, item } => Command::Unequip { id: id.into(), item },
        RosterCmd::Deploy { id } => Command::ToggleDeployment { id: id.into() },
        RosterCmd::Offense { id, position } => Command::OffensivePosition {
            id: id.into(),
            position: position.parse()?,
        },
        RosterCmd::Defense { id, position } => Command::DefensivePosition {
            id: id.into(),
            position: position.parse()?,
        },
    };
    Ok(Some(command))
}

fn mission_command(cmd: MissionCmd) -> Result<Option<Command>> {
    let command = match cmd {
        MissionCmd::Show => return Ok(None),
        MissionCmd::Start { threat_level } => Command::StartMission { threat_level },
        MissionCmd::End => Command::EndMission,
        MissionCmd::Threat { threat_level } => Command::SetThreatLevel(threat_level),
        MissionCmd::Momentum { value } => Command::SetMomentum(value),
        MissionCmd::Adjust { delta } => Command::AdjustMomentum(delta),
        MissionCmd::Cover { level } => Command::SetCover(level),
        MissionCmd::Space { level } => Command::SetSpace(level),
        MissionCmd::Exchange { step } => match step.as_str() {
            "next" | "+" => Command::NextExchange,
            "prev" | "-" => Command::PreviousExchange,
            "reset" => Command::ResetExchange,
            n => Command::SetExchange(
                n.parse()
                    .map_err(|_| TrackerError::InvalidValue {
                        field: "exchange".into(),
                        value: n.into(),
                    })?,
            ),
        },
        MissionCmd::Header => Command::ToggleHeader,
    };
    Ok(Some(command))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("danger_close=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = TrackerConfig::load(&args.config)?;
    if let Some(dir) = args.data_dir {
        config.data_dir = dir;
    }

    let store = FileStore::new(config.data_dir.clone());
    let mut session = Session::open(store, config)?;

    let command = match args.command {
        Area::Catalog => {
            print!("{}", report::catalog_listing(&load_catalog(session.config())?));
            return Ok(());
        }
        Area::Roster(RosterCmd::List { active }) => {
            let roster = session.roster();
            let troopers: Vec<_> = if active {
                roster.list_active().collect()
            } else {
                roster.list().iter().collect()
            };
            if troopers.is_empty() {
                println!("No troopers in the roster.");
            }
            for trooper in troopers {
                print!("{}", report::trooper_detail(trooper, roster.catalog(), roster.max_ammo()));
            }
            return Ok(());
        }
        Area::Roster(RosterCmd::Show { id }) => {
            let roster = session.roster();
            let id = TrooperId::from(id);
            let trooper = roster.get(&id).ok_or(TrackerError::TrooperNotFound(id))?;
            print!("{}", report::trooper_detail(trooper, roster.catalog(), roster.max_ammo()));
            return Ok(());
        }
        Area::Mission(MissionCmd::Show) => {
            print!("{}", report::mission_summary(session.mission()));
            return Ok(());
        }
        Area::Roster(cmd) => roster_command(cmd)?,
        Area::Mission(cmd) => mission_command(cmd)?,
    };

    if let Some(command) = command {
        let message = session.apply(command)?;
        println!("{}", message.trim_end());
    }

    Ok(())
}
