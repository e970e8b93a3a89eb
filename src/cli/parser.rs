use crate::export::ExportFormat;
use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for rSala
#[derive(Parser)]
#[command(
    name = "rsala",
    version = env!("CARGO_PKG_VERSION"),
    about = "Restaurant front-of-house: reservations, dining-room layouts, tables and opening hours",
    long_about = None
)]
pub struct Cli {
    /// Override the booking API base URL
    #[arg(global = true, long = "api", value_name = "URL")]
    pub api: Option<String>,

    /// Override local state database path (useful for tests)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Room/date/shift selection shared by the table, layout and template commands.
#[derive(Args, Debug, Clone)]
pub struct SlotArgs {
    /// Room name (defaults to `default_room` or the last room used)
    #[arg(long, short = 'r')]
    pub room: Option<String>,

    /// Date (YYYY-MM-DD, `today`, `tomorrow`)
    #[arg(long, short = 'd', default_value = "today")]
    pub date: String,

    /// Shift: PRANZO/lunch or CENA/dinner
    #[arg(long, short = 's')]
    pub shift: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the configuration and the local state database
    Init,

    /// Manage the configuration file (view, check or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing fields with their defaults")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(long = "editor", help = "Specify the editor to use (vim, nano, or custom path)")]
        editor: Option<String>,
    },

    /// Start a front-desk session
    Login {
        /// Staff user name
        username: String,
    },

    /// End the current session
    Logout,

    /// Show who is logged in
    Whoami,

    /// Print the internal log of operations
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Overview of a day: reservations, rooms and opening hours
    Dashboard {
        #[arg(long, short = 'd', default_value = "today")]
        date: String,
    },

    /// Bookable times for a date
    Slots {
        #[arg(long, short = 'd', default_value = "today")]
        date: String,

        #[arg(long, short = 's')]
        shift: Option<String>,
    },

    /// Manage reservations
    #[command(subcommand, visible_alias = "res")]
    Reservation(ReservationCmd),

    /// Manage rooms and their per-shift activation
    #[command(subcommand)]
    Room(RoomCmd),

    /// Show or edit the livable zones of a room
    #[command(subcommand)]
    Zones(ZonesCmd),

    /// Place tables and seat reservations (one-shot)
    #[command(subcommand)]
    Table(TableCmd),

    /// Interactive layout editor for a room/date/shift
    Layout {
        #[command(flatten)]
        slot: SlotArgs,

        /// Initial zoom factor (0.5 – 3.5)
        #[arg(long, default_value_t = 1.0)]
        zoom: f64,
    },

    /// Manage room layout templates
    #[command(subcommand)]
    Template(TemplateCmd),

    /// Manage opening hours (working days)
    #[command(subcommand)]
    Hours(HoursCmd),

    /// Export the reservations of a date
    Export {
        #[arg(long, short = 'd', default_value = "today")]
        date: String,

        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum ReservationCmd {
    /// List the reservations of a date
    List {
        #[arg(long, short = 'd', default_value = "today")]
        date: String,

        #[arg(long, short = 's')]
        shift: Option<String>,
    },

    /// Show one reservation
    Show {
        name: String,

        #[arg(long, short = 'd', default_value = "today")]
        date: String,
    },

    /// Create a reservation
    Add {
        name: String,

        /// Party size
        #[arg(long = "people", short = 'p')]
        people: u32,

        #[arg(long, short = 'd')]
        date: String,

        /// Time (HH:MM), must be one of the bookable slots
        #[arg(long, short = 't')]
        time: String,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        note: Option<String>,

        /// Skip the opening-hours check
        #[arg(long)]
        force: bool,
    },

    /// Delete a reservation
    Del {
        name: String,

        #[arg(long, short = 'd')]
        date: String,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum RoomCmd {
    /// List rooms
    List,

    /// Show a room and its zones
    Show { name: String },

    /// Create an empty room
    Add { name: String },

    /// Delete a room with its tables and configurations
    Del {
        name: String,

        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Enable table editing for a date/shift
    Activate {
        name: String,

        #[arg(long, short = 'd', default_value = "today")]
        date: String,

        #[arg(long, short = 's')]
        shift: String,
    },

    /// Show which shifts of a date are configured
    Status {
        name: String,

        #[arg(long, short = 'd', default_value = "today")]
        date: String,
    },
}

#[derive(Subcommand)]
pub enum ZonesCmd {
    /// Render the zone map of a room
    Show { room: String },

    /// Interactive zone editor
    Edit { room: String },
}

#[derive(Subcommand)]
pub enum TableCmd {
    /// List tables with their groups
    List {
        #[command(flatten)]
        slot: SlotArgs,
    },

    /// Place a free table on a livable cell
    Place {
        x: u32,
        y: u32,

        #[command(flatten)]
        slot: SlotArgs,
    },

    /// Remove the table on a cell
    Remove {
        x: u32,
        y: u32,

        #[command(flatten)]
        slot: SlotArgs,

        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Seat a reservation at a table
    Assign {
        x: u32,
        y: u32,
        reservation: String,

        #[command(flatten)]
        slot: SlotArgs,
    },

    /// Remove a reservation from a table group
    Ungroup {
        x: u32,
        y: u32,
        reservation: String,

        #[command(flatten)]
        slot: SlotArgs,
    },

    /// Reservations seated at a table
    Group {
        x: u32,
        y: u32,

        #[command(flatten)]
        slot: SlotArgs,
    },
}

#[derive(Subcommand)]
pub enum TemplateCmd {
    /// List templates of a room
    List {
        #[arg(long, short = 'r')]
        room: Option<String>,
    },

    /// Save the tables of an active room/date/shift as a template
    Create {
        name: String,

        #[command(flatten)]
        slot: SlotArgs,
    },

    /// Apply a template to another date/shift
    Apply {
        name: String,

        #[command(flatten)]
        slot: SlotArgs,
    },

    /// Delete a template
    Delete {
        name: String,

        #[arg(long, short = 'r')]
        room: Option<String>,

        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum HoursCmd {
    /// List every working-day entry
    List,

    /// Show the entries of one day type
    Show {
        /// WEEKDAY, SATURDAY, SUNDAY or SPECIAL
        kind: String,
    },

    /// Resolve the opening hours of a date
    Resolve {
        #[arg(long, short = 'd', default_value = "today")]
        date: String,
    },

    /// Create or replace a working-day entry
    Set {
        kind: String,

        /// Required for SPECIAL
        #[arg(long, short = 'd')]
        date: Option<String>,

        /// Lunch window, HH:MM-HH:MM
        #[arg(long, conflicts_with = "lunch_closed")]
        lunch: Option<String>,

        #[arg(long)]
        lunch_closed: bool,

        /// Dinner window, HH:MM-HH:MM
        #[arg(long, conflicts_with = "dinner_closed")]
        dinner: Option<String>,

        #[arg(long)]
        dinner_closed: bool,
    },

    /// Delete a template entry, or a SPECIAL entry by date
    Delete {
        kind: String,

        #[arg(long, short = 'd')]
        date: Option<String>,

        #[arg(long, short = 'y')]
        yes: bool,
    },
}
