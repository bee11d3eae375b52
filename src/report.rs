// Terminal rendering for the CLI commands.

use colored::{ColoredString, Colorize};

use crate::champion::Demotion;
use crate::domain::{LeaderboardView, Placement, Player, Tier};
use crate::identity::PlayerLookup;
use crate::ranking;
use crate::services::TierUpdate;

pub fn print_overall(players: &[Player], search: &str) {
    let matching = ranking::filter_by_search(players, search);

    println!("{}", "Overall".bold());
    for (i, player) in ranking::rank_all(players).into_iter().enumerate() {
        if !matching.iter().any(|found| found.id == player.id) {
            continue;
        }
        let best = ranking::overall_tier(player)
            .map(|tier| paint_tier(tier, tier.code()).to_string())
            .unwrap_or_default();
        println!(
            "{:>4}. {:<20} {:>4} pts  {}",
            i + 1,
            player.display_name,
            player.total_score(),
            best
        );
    }
}

pub fn print_mode(players: &[Player], view: LeaderboardView, search: &str) {
    let matching = ranking::filter_by_search(players, search);
    let groups = ranking::group_by_tier(players, view);

    println!("{}", view.to_string().bold());
    for (tier, members) in groups {
        let members: Vec<&Player> = members
            .into_iter()
            .filter(|player| matching.iter().any(|found| found.id == player.id))
            .collect();
        if members.is_empty() {
            continue;
        }

        println!("{}", paint_tier(tier, &format!("{} ({} pts)", tier, tier.points())));
        for player in members {
            println!("    {:<20} {:>4} pts", player.display_name, player.total_score());
        }
    }
}

pub fn print_profile(lookup: &PlayerLookup, spotlight_tiers: usize) {
    let player = &lookup.player;
    let rank = lookup
        .global_rank
        .map(|rank| format!("#{}", rank))
        .unwrap_or_else(|| "unranked".to_string());

    println!("{} ({})", player.display_name.bold(), player.id);
    println!("Rank {}  {} pts", rank, player.total_score());

    let best: Vec<String> = ranking::best_tiers(player, spotlight_tiers)
        .into_iter()
        .map(|(mode, placement)| format!("{} {}", mode, paint_placement(placement)))
        .collect();
    if !best.is_empty() {
        println!("Best: {}", best.join(", "));
    }

    for (mode, placement) in ranking::profile_modes(player) {
        match placement {
            Some(placement) => {
                let peak = placement.peak.map(|peak| format!(" peak {}", peak)).unwrap_or_default();
                println!("  {:<12} {}{}", mode.name(), paint_placement(placement), peak);
            }
            None => println!("  {:<12} {}", mode.name(), "-".dimmed()),
        }
    }
}

pub fn print_update(update: &TierUpdate) {
    let player = &update.player;
    println!("{} now has {} pts", player.display_name.bold(), player.total_score());
    print_demotions(&update.demotions);
}

pub fn print_demotions(demotions: &[Demotion]) {
    for demotion in demotions {
        println!(
            "{} {} lost HT1 in {} and moved to LT1",
            "demoted".yellow(),
            demotion.display_name,
            demotion.mode
        );
    }
}

// --- Helper Methods ---

fn paint_placement(placement: &Placement) -> ColoredString {
    if placement.retired {
        placement.label().dimmed()
    } else {
        paint_tier(placement.current, &placement.label())
    }
}

fn paint_tier(tier: Tier, text: &str) -> ColoredString {
    match tier.division() {
        1 => text.bright_yellow().bold(),
        2 => text.bright_white(),
        3 => text.yellow(),
        _ => text.normal(),
    }
}
