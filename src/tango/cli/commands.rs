use super::print::{
    print_messages, print_word_list, render_daily, render_lists, render_word_detail, Message,
};
use super::setup::{Cli, Commands, ListCommands};
use clap::Parser;
use directories::ProjectDirs;
use log::debug;
use std::path::{Path, PathBuf};
use tango::api::{ConfigAction, TangoApi};
use tango::daily::today;
use tango::error::{Result, TangoError};
use tango::model::{Frequency, WordUpdate};
use tango::store::fs::FileGateway;

const HOME_ENV: &str = "TANGO_HOME";

struct AppContext {
    api: TangoApi<FileGateway>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Add {
            vocabulary,
            pronunciation,
            meaning,
        }) => handle_add(&mut ctx, &vocabulary, &pronunciation, &meaning),
        Some(Commands::Ls {
            search,
            recent,
            limit,
            freq,
        }) => handle_ls(&ctx, search, recent, limit, freq),
        Some(Commands::Show { word }) => handle_show(&ctx, &word),
        Some(Commands::Edit {
            word,
            vocabulary,
            pronunciation,
            meaning,
        }) => {
            let changes = WordUpdate {
                vocabulary,
                pronunciation,
                meaning,
            };
            handle_edit(&mut ctx, &word, changes)
        }
        Some(Commands::Rate { frequency, words }) => handle_rate(&mut ctx, frequency, &words),
        Some(Commands::Rm { words }) => handle_rm(&mut ctx, &words),
        Some(Commands::Clear { yes }) => handle_clear(&mut ctx, yes),
        Some(Commands::Daily { generate }) => handle_daily(&mut ctx, generate),
        Some(Commands::List(cmd)) => handle_list(&mut ctx, cmd),
        Some(Commands::Export { path, stdout }) => handle_export(&ctx, path, stdout),
        Some(Commands::Import { file }) => handle_import(&mut ctx, &file),
        Some(Commands::Config { key, value }) => handle_config(&mut ctx, key, value),
        None => handle_ls(&ctx, None, false, None, None),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = resolve_data_dir(cli.data_dir.as_deref())?;
    debug!("data dir: {}", data_dir.display());

    let gateway = FileGateway::new(data_dir.clone());
    let api = TangoApi::open(gateway, data_dir)?;
    Ok(AppContext { api })
}

/// `--data-dir`, then `$TANGO_HOME`, then the platform data directory.
fn resolve_data_dir(flag: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir.to_path_buf());
    }
    if let Some(dir) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "tango", "tango")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| {
            TangoError::Api(format!(
                "Could not determine a data directory; set {} or pass --data-dir",
                HOME_ENV
            ))
        })
}

fn handle_add(
    ctx: &mut AppContext,
    vocabulary: &str,
    pronunciation: &str,
    meaning: &str,
) -> Result<()> {
    let word = ctx.api.add_word(vocabulary, pronunciation, meaning)?;
    print_messages(&[Message::success(format!(
        "Added {} ({}) - {}",
        word.vocabulary, word.pronunciation, word.meaning
    ))]);
    Ok(())
}

fn handle_ls(
    ctx: &AppContext,
    search: Option<String>,
    recent: bool,
    limit: Option<usize>,
    freq: Option<Frequency>,
) -> Result<()> {
    let words = if let Some(term) = search {
        ctx.api.search_words(&term)
    } else if recent {
        ctx.api.recent_words(limit)
    } else if let Some(tier) = freq {
        ctx.api.words_by_frequency(tier)
    } else {
        ctx.api.all_words()
    };
    print_word_list(&words);
    Ok(())
}

fn handle_show(ctx: &AppContext, selector: &str) -> Result<()> {
    let word = ctx.api.word(selector)?;
    let lists = ctx.api.word_lists(selector)?;
    print!("{}", render_word_detail(&word, &lists));
    Ok(())
}

fn handle_edit(ctx: &mut AppContext, selector: &str, changes: WordUpdate) -> Result<()> {
    let word = ctx.api.update_word(selector, changes)?;
    print_messages(&[Message::success(format!(
        "Updated {} ({}) - {}",
        word.vocabulary, word.pronunciation, word.meaning
    ))]);
    Ok(())
}

fn handle_rate(ctx: &mut AppContext, frequency: Frequency, selectors: &[String]) -> Result<()> {
    let rated = ctx.api.rate_words(selectors, frequency)?;
    let messages: Vec<Message> = rated
        .iter()
        .map(|w| {
            Message::success(format!(
                "Rated {} as {} (reviewed {} times)",
                w.vocabulary, frequency, w.review_count
            ))
        })
        .collect();
    print_messages(&messages);
    Ok(())
}

fn handle_rm(ctx: &mut AppContext, selectors: &[String]) -> Result<()> {
    let removed = ctx.api.remove_words(selectors)?;
    let messages: Vec<Message> = removed
        .iter()
        .map(|w| Message::success(format!("Deleted {}", w.vocabulary)))
        .collect();
    print_messages(&messages);
    Ok(())
}

fn handle_clear(ctx: &mut AppContext, yes: bool) -> Result<()> {
    if !yes {
        let count = ctx.api.repository().words().len();
        print_messages(&[Message::warning(format!(
            "This deletes all {} words. Run `tango clear --yes` to confirm.",
            count
        ))]);
        return Ok(());
    }
    let count = ctx.api.clear_words()?;
    print_messages(&[Message::success(format!("Deleted {} words", count))]);
    Ok(())
}

fn handle_daily(ctx: &mut AppContext, generate: bool) -> Result<()> {
    let today = today();
    let selection = if generate {
        ctx.api.generate_daily(today)?
    } else {
        ctx.api.daily(today)
    };
    let words = ctx.api.display(selection.words.clone());
    print!("{}", render_daily(&selection, &words));
    Ok(())
}

fn handle_list(ctx: &mut AppContext, cmd: ListCommands) -> Result<()> {
    match cmd {
        ListCommands::Ls => {
            print!("{}", render_lists(ctx.api.lists()));
        }
        ListCommands::New { name, with } => {
            let list = ctx.api.create_list(&name, with.as_deref())?;
            print_messages(&[Message::success(format!("Created list {}", list.name))]);
        }
        ListCommands::Rename { name, new_name } => {
            let list = ctx.api.rename_list(&name, &new_name)?;
            print_messages(&[Message::success(format!(
                "Renamed {} to {}",
                name.trim(),
                list.name
            ))]);
        }
        ListCommands::Rm { name } => {
            let list = ctx.api.remove_list(&name)?;
            print_messages(&[Message::success(format!("Deleted list {}", list.name))]);
        }
        ListCommands::Add { name, words } => {
            let list = ctx.api.add_to_list(&name, &words)?;
            print_messages(&[Message::success(format!(
                "{} now has {} words",
                list.name,
                list.word_ids.len()
            ))]);
        }
        ListCommands::Remove { name, words } => {
            let removed = ctx.api.remove_from_list(&name, &words)?;
            let message = if removed == 0 {
                Message::info("Nothing to remove")
            } else {
                Message::success(format!("Removed {} words from {}", removed, name.trim()))
            };
            print_messages(&[message]);
        }
        ListCommands::Move { from, to, words } => {
            let moved = ctx.api.move_between_lists(&from, &to, &words)?;
            print_messages(&[Message::success(format!(
                "Moved {} words from {} to {}",
                moved,
                from.trim(),
                to.trim()
            ))]);
        }
        ListCommands::Show { name } => {
            let (list, members) = ctx.api.list_members(&name)?;
            println!("{}", list.name);
            print_word_list(&members);
        }
    }
    Ok(())
}

fn handle_export(ctx: &AppContext, path: Option<PathBuf>, stdout: bool) -> Result<()> {
    let today = today();
    if stdout {
        print!("{}", ctx.api.export_text(today)?);
        return Ok(());
    }
    let dir = match path {
        Some(dir) => dir,
        None => std::env::current_dir().map_err(TangoError::Io)?,
    };
    let written = ctx.api.export_to(&dir, today)?;
    print_messages(&[Message::success(format!(
        "Exported {} words to {}",
        ctx.api.repository().words().len(),
        written.display()
    ))]);
    Ok(())
}

fn handle_import(ctx: &mut AppContext, file: &Path) -> Result<()> {
    let words = ctx.api.import_file(file)?;
    print_messages(&[Message::success(format!(
        "Imported {} words from {}",
        words.len(),
        file.display()
    ))]);
    Ok(())
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };
    let is_set = matches!(action, ConfigAction::Set(..));

    let pairs = ctx.api.config_action(action)?;
    if is_set {
        let messages: Vec<Message> = pairs
            .iter()
            .map(|(key, value)| Message::success(format!("{} set to {}", key, value)))
            .collect();
        print_messages(&messages);
    } else {
        for (key, value) in pairs {
            println!("{} = {}", key, value);
        }
    }
    Ok(())
}
