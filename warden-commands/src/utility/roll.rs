use warden_core::{Context, Error};
use warden_utils::parse::{Dice, MAX_DICE, MAX_SIDES, parse_dice, roll_dice};

use crate::CommandMeta;

pub const META: CommandMeta = CommandMeta {
    name: "roll",
    desc: "Roll dice (default 1d6).",
    category: "fun",
    usage: "!roll [NdM]",
};

#[poise::command(prefix_command, slash_command, category = "Fun")]
pub async fn roll(
    ctx: Context<'_>,
    #[description = "Dice notation, e.g. 2d20"] dice: Option<String>,
) -> Result<(), Error> {
    let Some(dice) = parse_dice(dice.as_deref().unwrap_or_default()) else {
        ctx.say(format!(
            "Invalid dice. Usage: `{}` (up to {MAX_DICE} dice with 2-{MAX_SIDES} sides)",
            META.usage
        ))
        .await?;
        return Ok(());
    };

    let rolls = roll_dice(dice, &mut rand::thread_rng());
    ctx.say(roll_message(dice, &rolls)).await?;
    Ok(())
}

fn roll_message(dice: Dice, rolls: &[u32]) -> String {
    let total: u32 = rolls.iter().sum();
    if rolls.len() == 1 {
        return format!("🎲 {}d{}: **{}**", dice.count, dice.sides, total);
    }

    let faces = rolls
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(" + ");
    format!("🎲 {}d{}: {} = **{}**", dice.count, dice.sides, faces, total)
}

#[cfg(test)]
mod tests {
    use super::roll_message;
    use warden_utils::parse::Dice;

    #[test]
    fn single_die_shows_only_total() {
        assert_eq!(roll_message(Dice { count: 1, sides: 6 }, &[4]), "🎲 1d6: **4**");
    }

    #[test]
    fn multiple_dice_show_faces() {
        assert_eq!(
            roll_message(Dice { count: 3, sides: 6 }, &[1, 5, 6]),
            "🎲 3d6: 1 + 5 + 6 = **12**"
        );
    }
}
