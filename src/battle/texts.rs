//! Narration line builders for the battle log.

use schema::{BattleStat, StatusAilment};

pub fn wild_appeared(enemy: &str) -> String {
    format!("A wild {} appeared!", enemy)
}

pub fn go_player(player: &str) -> String {
    format!("Go, {}!", player)
}

pub fn prompt_what_will_do(player: &str) -> String {
    format!("What will {} do?", player)
}

pub fn cannot_act(name: &str) -> String {
    format!("{} has fainted and cannot act!", name)
}

pub fn used_skill(attacker: &str, skill: &str) -> String {
    format!("{} used {}!", attacker, skill)
}

pub fn missed() -> String {
    "But it missed!".to_string()
}

pub fn took_damage(defender: &str, damage: i32) -> String {
    format!("{} took {} damage!", defender, damage)
}

pub fn fainted(name: &str) -> String {
    format!("{} fainted!", name)
}

pub fn stage_changed(name: &str, stat: BattleStat, applied: i32) -> String {
    let direction = if applied > 0 { "rose" } else { "fell" };
    format!("{}'s {} {}!", name, stat, direction)
}

pub fn status_applied(name: &str, ailment: StatusAilment) -> String {
    match ailment {
        StatusAilment::Poison => format!("{} was poisoned!", name),
        StatusAilment::Burn => format!("{} was burned!", name),
        StatusAilment::None => format!("{} is unaffected!", name),
    }
}

pub fn no_effect() -> String {
    "But it had no effect!".to_string()
}

pub fn nothing_happened() -> String {
    "But nothing happened!".to_string()
}

pub fn no_usable_skill(name: &str) -> String {
    format!("{} has no skill to use!", name)
}

pub fn hurt_by_status(name: &str, ailment: StatusAilment, damage: i32) -> String {
    format!("{} is hurt by its {}! ({} damage)", name, ailment, damage)
}

pub fn battle_won() -> String {
    "You won the battle!".to_string()
}

pub fn battle_lost() -> String {
    "You lost the battle...".to_string()
}

pub fn gained_exp(name: &str, amount: i32) -> String {
    format!("{} gained {} EXP!", name, amount)
}

pub fn level_up(name: &str, level: i32) -> String {
    format!("{} grew to level {}!", name, level)
}
