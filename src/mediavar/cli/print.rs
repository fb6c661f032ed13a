use colored::Colorize;
use mediavar::api::{AssetFile, CmdMessage, MessageLevel};
use mediavar::config::{MediaConfig, CONFIG_KEYS};
use mediavar::model::Asset;
use mediavar::recipe::Recipe;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => eprintln!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_assets(assets: &[Asset]) {
    if assets.is_empty() {
        println!("No assets found.");
        return;
    }

    for asset in assets {
        println!(
            "{}  {:<6}  {}:{}",
            asset.id.to_string().dimmed(),
            asset.kind.to_string(),
            asset.disk.cyan(),
            asset.plain_path()
        );
    }
}

pub(super) fn print_files(files: &[AssetFile]) {
    for file in files {
        let label = if file.recipe.is_empty() {
            "original".bold()
        } else {
            file.recipe.normal()
        };
        let path = if file.exists {
            file.path.normal()
        } else {
            format!("{} (missing)", file.path).red()
        };
        println!("{}\n    {}", label, path);
    }
}

pub(super) fn print_history(history: &[Recipe]) {
    for (i, recipe) in history.iter().enumerate() {
        println!("{}. {}", (i + 1).to_string().yellow(), recipe);
    }
}

pub(super) fn print_config(config: &MediaConfig) {
    for key in CONFIG_KEYS {
        if let Ok(value) = config.get(key) {
            println!("{} = {}", key.bold(), value);
        }
    }
    println!("{}", "disks".bold());
    for (name, root) in &config.disks {
        let marker = if *name == config.default_disk { "*" } else { " " };
        println!("  {} {} -> {}", marker, name.cyan(), root.display());
    }
}
