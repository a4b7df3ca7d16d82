use crate::{COMMANDS, CommandMeta};
use warden_core::{Context, Error};
use warden_utils::embed::titled_embed;

pub const META: CommandMeta = CommandMeta {
    name: "help",
    desc: "Lists out all available commands.",
    category: "utility",
    usage: "!help [category]",
};

#[poise::command(prefix_command, slash_command, category = "Utility")]
pub async fn help(
    ctx: Context<'_>,
    #[description = "Category"] category: Option<String>,
) -> Result<(), Error> {
    let category = category.as_deref().map(str::trim).filter(|raw| !raw.is_empty());
    let commands = sorted_commands(COMMANDS, category);

    if commands.is_empty() {
        let mut categories: Vec<&str> = COMMANDS.iter().map(|c| c.category).collect();
        categories.sort_unstable();
        categories.dedup();
        ctx.say(format!(
            "Unknown category. Available categories: {}",
            categories.join(", ")
        ))
        .await?;
        return Ok(());
    }

    let embed = titled_embed("Available Commands", grouped_help_description(&commands));
    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

fn sorted_commands<'a>(all: &'a [CommandMeta], category: Option<&str>) -> Vec<&'a CommandMeta> {
    let mut filtered: Vec<&CommandMeta> = all
        .iter()
        .filter(|cmd| category.is_none_or(|wanted| cmd.category.eq_ignore_ascii_case(wanted)))
        .collect();

    filtered.sort_unstable_by(|left, right| {
        left.category
            .cmp(right.category)
            .then_with(|| left.name.cmp(right.name))
    });
    filtered
}

fn grouped_help_description(commands: &[&CommandMeta]) -> String {
    let mut out = String::new();
    let mut current: Option<&str> = None;

    for cmd in commands {
        if current != Some(cmd.category) {
            if current.is_some() {
                out.push('\n');
            }
            out.push_str(&format!("**{}**\n", capitalize(cmd.category)));
            current = Some(cmd.category);
        }
        out.push_str(&format!("`{}` {}\n", cmd.usage, cmd.desc));
    }

    out.trim_end().to_owned()
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
