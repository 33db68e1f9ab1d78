//! Dice table for the gacya skill.

/// Bonus damage for three sixes.
pub const JACKPOT_DAMAGE: i32 = 300;
/// Bonus damage when any two dice match.
pub const PAIR_DAMAGE: i32 = 60;
/// Bonus damage when a one shows and nothing better applies.
pub const ONE_DAMAGE: i32 = 30;

/// Damage dealt to the target for a three-die roll.
pub fn gacya_damage(dice: [u8; 3]) -> i32 {
    let [a, b, c] = dice;
    if a == 6 && b == 6 && c == 6 {
        JACKPOT_DAMAGE
    } else if a == b || b == c || c == a {
        PAIR_DAMAGE
    } else if a == 1 || b == 1 || c == 1 {
        ONE_DAMAGE
    } else {
        0
    }
}
