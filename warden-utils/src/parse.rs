use rand::Rng;

/// Parse a compact duration like `30s`, `10m`, `2h`, `1d`, `1h30m` or plain
/// seconds. A bare number is only accepted on its own.
pub fn parse_duration_seconds(raw: &str) -> Option<u64> {
    let compact: String = raw.chars().filter(|ch| !ch.is_whitespace()).collect();
    if compact.is_empty() {
        return None;
    }

    if let Ok(seconds) = compact.parse::<u64>() {
        return (seconds > 0).then_some(seconds);
    }

    let mut total = 0_u64;
    let mut digits = String::new();
    for ch in compact.chars() {
        if ch.is_ascii_digit() {
            digits.push(ch);
            continue;
        }

        let multiplier = match ch.to_ascii_lowercase() {
            's' => 1,
            'm' => 60,
            'h' => 3_600,
            'd' => 86_400,
            _ => return None,
        };
        let number = digits.parse::<u64>().ok().filter(|n| *n > 0)?;
        digits.clear();
        total = total.checked_add(number.checked_mul(multiplier)?)?;
    }

    // Trailing digits without a unit, e.g. `1h30`.
    if !digits.is_empty() {
        return None;
    }

    (total > 0).then_some(total)
}

pub const MAX_DICE: u32 = 20;
pub const MAX_SIDES: u32 = 1_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dice {
    pub count: u32,
    pub sides: u32,
}

impl Default for Dice {
    fn default() -> Self {
        Self { count: 1, sides: 6 }
    }
}

/// Parse dice notation such as `2d20`, `d8` or `3` (three d6).
pub fn parse_dice(raw: &str) -> Option<Dice> {
    let value = raw.trim().to_ascii_lowercase();
    if value.is_empty() {
        return Some(Dice::default());
    }

    let dice = match value.split_once('d') {
        Some((count, sides)) => Dice {
            count: if count.is_empty() { 1 } else { count.parse().ok()? },
            sides: sides.parse().ok()?,
        },
        None => Dice {
            count: value.parse().ok()?,
            ..Dice::default()
        },
    };

    let in_range = (1..=MAX_DICE).contains(&dice.count) && (2..=MAX_SIDES).contains(&dice.sides);
    in_range.then_some(dice)
}

pub fn roll_dice(dice: Dice, rng: &mut impl Rng) -> Vec<u32> {
    (0..dice.count)
        .map(|_| rng.gen_range(1..=dice.sides))
        .collect()
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::{Dice, parse_dice, parse_duration_seconds, roll_dice};

    #[test]
    fn parses_durations() {
        assert_eq!(parse_duration_seconds("30s"), Some(30));
        assert_eq!(parse_duration_seconds("10m"), Some(600));
        assert_eq!(parse_duration_seconds("2H"), Some(7_200));
        assert_eq!(parse_duration_seconds("1d"), Some(86_400));
        assert_eq!(parse_duration_seconds("1h 30m"), Some(5_400));
        assert_eq!(parse_duration_seconds("90"), Some(90));
    }

    #[test]
    fn rejects_bad_durations() {
        assert_eq!(parse_duration_seconds(""), None);
        assert_eq!(parse_duration_seconds("0"), None);
        assert_eq!(parse_duration_seconds("0m"), None);
        assert_eq!(parse_duration_seconds("1h30"), None);
        assert_eq!(parse_duration_seconds("5w"), None);
        assert_eq!(parse_duration_seconds("m"), None);
    }

    #[test]
    fn parses_dice_notation() {
        assert_eq!(parse_dice(""), Some(Dice { count: 1, sides: 6 }));
        assert_eq!(parse_dice("2d20"), Some(Dice { count: 2, sides: 20 }));
        assert_eq!(parse_dice("D8"), Some(Dice { count: 1, sides: 8 }));
        assert_eq!(parse_dice("3"), Some(Dice { count: 3, sides: 6 }));
    }

    #[test]
    fn rejects_out_of_range_dice() {
        assert_eq!(parse_dice("0d6"), None);
        assert_eq!(parse_dice("21d6"), None);
        assert_eq!(parse_dice("1d1"), None);
        assert_eq!(parse_dice("1d1001"), None);
        assert_eq!(parse_dice("xdy"), None);
    }

    #[test]
    fn rolls_stay_within_sides() {
        let mut rng = StdRng::seed_from_u64(7);
        let rolls = roll_dice(Dice { count: 20, sides: 4 }, &mut rng);
        assert_eq!(rolls.len(), 20);
        assert!(rolls.iter().all(|roll| (1..=4).contains(roll)));
    }
}
