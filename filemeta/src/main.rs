#[macro_use(trace, debug, info, error)]
extern crate log;

use {
    clap::{Parser, Subcommand, ValueEnum},
    filemeta::{
        error::StoreError, keys, FileMetadata, MetadataDirectory, RawMetadata as _,
        StoredMetadata,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Field {
    Name,
    Type,
    Size,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Register a new, empty entry and print its id
    New {
        /// Display name, the type's extension is appended when it has none
        name: Option<String>,

        /// MIME type, e.g. image/jpeg
        file_type: Option<String>,
    },

    /// Print everything known about an entry
    Show { id: uuid::Uuid },

    /// Change one field of an entry
    Set {
        id: uuid::Uuid,

        #[arg(value_enum)]
        field: Field,

        /// An empty name removes it
        value: String,
    },

    /// One line per entry of the metadata directory
    List,

    /// Delete an entry
    Rm { id: uuid::Uuid },
}

/// Inspect and edit file metadata stored as `.meta` files
#[derive(Debug, Parser)]
#[command(name = "filemeta")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("Invalid size '{value}', expected a positive integer")]
    InvalidSize { value: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Small print to show the start of the program log
    trace!(
        "\n╭{line}╮\n│{message:^30}│\n╰{line}╯",
        line = "─".repeat(30),
        message = "Program start"
    );

    let cli = Cli::parse();

    let directory = MetadataDirectory::from_config();
    display_config(&directory);

    if let Err(e) = run(&directory, cli) {
        error!("{e}");
        std::process::exit(1)
    }
}

fn run(directory: &MetadataDirectory, cli: Cli) -> Result<(), CliError> {
    match cli.cmd {
        Command::New { name, file_type } => {
            let mut metadata = FileMetadata::create(directory.create()?);

            if let Some(file_type) = file_type {
                metadata.set_type(&file_type);
            }
            if let Some(name) = name {
                metadata.set_name(Some(&name));
            }
            metadata.modification_time();

            let entry = metadata.into_inner();
            directory.save(&entry)?;

            info!("Created {}", entry.uuid().as_hyphenated());
            println!("{}", entry.uuid().as_hyphenated());
        }
        Command::Show { id } => {
            let mut metadata = FileMetadata::create(directory.open(id)?);

            let stored_time = metadata.store().try_get(keys::FILE_MODIFICATION_TIME);
            let report = describe(&mut metadata);

            if metadata.store().try_get(keys::FILE_MODIFICATION_TIME) != stored_time {
                debug!("[{id}] Saving healed modification time");
                directory.save(metadata.store())?;
            }

            println!("{report}");
        }
        Command::Set { id, field, value } => {
            let mut metadata = FileMetadata::create(directory.open(id)?);

            match field {
                Field::Name => metadata.set_name(Some(value.as_str()).filter(|v| !v.is_empty())),
                Field::Type => metadata.set_type(&value),
                Field::Size => metadata.set_size(
                    value
                        .parse::<u64>()
                        .map_err(|_| CliError::InvalidSize { value: value.clone() })?,
                ),
            }
            metadata.set_modification_time(time::OffsetDateTime::now_utc());

            directory.save(metadata.store())?;
            debug!("[{id}] Updated {field:?}");
        }
        Command::List => {
            for entry in directory.list()? {
                let uuid = entry.uuid();
                let metadata = FileMetadata::create(entry);

                println!(
                    "{uuid}  {size:>12}  {file_type:<30}  {name}",
                    uuid = uuid.as_hyphenated(),
                    size = metadata.size(),
                    file_type = metadata.file_type(),
                    name = metadata.name(),
                );
            }
        }
        Command::Rm { id } => {
            directory.remove(id)?;
            info!("Removed {}", id.as_hyphenated());
        }
    }

    Ok(())
}

fn describe(metadata: &mut FileMetadata<StoredMetadata>) -> String {
    use std::fmt::Write as _;

    let modification_time = metadata.modification_time();
    let file_type = metadata.file_type();

    let mut out = format!(
        "Id: {uuid}\nName: {name}\nSize: {size}\nType: {file_type} ({description})\nExtensions: {extensions}\nModified: {modified}\nRaw:",
        uuid = metadata.store().uuid().as_hyphenated(),
        name = metadata.name(),
        size = metadata.size(),
        description = file_type.description(),
        extensions = file_type.common_extensions().join(", "),
        modified = modification_time
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap_or_else(|_| modification_time.unix_timestamp().to_string()),
    );

    let store = metadata.store();

    let mut others = store
        .values()
        .iter()
        .filter(|(key, _)| !keys::ALL.contains(&key.as_str()))
        .collect::<Vec<_>>();
    others.sort_by(|a, b| a.0.cmp(b.0));

    // Writing to a string cannot fail
    for key in keys::ALL {
        let value = store
            .try_get(key)
            .map(|value| value.to_string())
            .unwrap_or_else(|| String::from("-"));
        let _ = write!(out, "\n    {key}: {value}");
    }
    for (key, value) in others {
        let _ = write!(out, "\n    {key}: {value}");
    }

    out
}

/// Displays the config in the console
fn display_config(directory: &MetadataDirectory) {
    info!(
        "\nConfig:\nMetadata directory: {dir} (from {env}: {from_env})\nKnown types: {types}",
        dir = directory.path().display(),
        env = filemeta::config::METADATA_DIRECTORY_ENV,
        from_env = std::env::var_os(filemeta::config::METADATA_DIRECTORY_ENV).is_some(),
        types = filemeta::MimeMap::builtin().len(),
    );
}
