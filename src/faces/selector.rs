use super::error::PlayError;
use crate::cards::Card;
use crate::cards::Hand;
use crate::cards::Rank;

/// Resolves rank-selector characters into concrete cards from `hand`.
///
/// Each selector takes the highest-suited plain card of that rank still
/// unchosen, then a wildcard of that rank playing as itself, then any
/// unchosen wildcard bound to the requested rank. `*` takes a wildcard
/// left free for the parser to bind, except when it is the only selector:
/// a lone wildcard plays as its own rank. Whitespace is ignored.
pub fn select(hand: &Hand, input: &str) -> Result<Vec<Card>, PlayError> {
    let mut chosen = Vec::<Card>::new();
    for c in input.chars().filter(|c| !c.is_whitespace()) {
        let unused = |card: &&Card| !chosen.contains(*card);
        let card = if c == '*' {
            hand.wilds()
                .rev()
                .find(unused)
                .map(|w| w.unbind())
                .ok_or(PlayError::NoWild)?
        } else {
            let rank = Rank::try_from(c).map_err(PlayError::Unknown)?;
            hand.of(rank)
                .rev()
                .filter(|x| !x.is_wild())
                .find(unused)
                .map(|x| x.unbind())
                .or_else(|| {
                    hand.of(rank)
                        .rev()
                        .filter(|x| x.is_wild())
                        .find(unused)
                        .map(|x| x.bind(rank))
                })
                .or_else(|| match rank.is_joker() {
                    true => None,
                    false => hand.wilds().rev().find(unused).map(|x| x.bind(rank)),
                })
                .ok_or(PlayError::Missing(rank))?
        };
        chosen.push(card);
    }
    if let [lone] = chosen.as_mut_slice() {
        if lone.is_free() {
            *lone = lone.bind(lone.rank());
        }
    }
    Ok(chosen)
}
