use super::face::Face;
use super::parser::parse;
use super::rules::Rules;
use crate::cards::Card;
use crate::cards::Hand;
use crate::cards::Rank;

/// Finds some play from `hand` that legally follows `last`.
///
/// With nothing on the table the lowest single is offered. Otherwise the
/// search tries the same shape at the lowest strength that wins, then
/// bombs lowest first, then the rocket. Wildcards count only as their own
/// rank here.
pub fn hint(hand: &Hand, last: Option<&Face>, rules: &dyn Rules) -> Option<Vec<Card>> {
    let pool = hand
        .cards()
        .iter()
        .map(|c| if c.is_wild() { c.bind(c.rank()) } else { *c })
        .collect::<Vec<_>>();
    let Some(last) = last else {
        return pool.first().map(|c| vec![*c]);
    };
    let beats = |cards: &[Card]| parse(cards, rules).iter().any(|c| c.face.beats(last));
    let groups = group(&pool, rules);
    if !last.kind().is_bomb() {
        let kind = last.kind();
        let size = kind.group();
        let mains = last.ranks().len();
        for window in windows(&groups, size, mains, rules) {
            let mut cards = groups
                .iter()
                .filter(|(r, _)| window.contains(r))
                .flat_map(|(_, cs)| cs.iter().take(size).copied())
                .collect::<Vec<_>>();
            let (count, pairs) = kind.wings(mains);
            if count > 0 {
                match wings(&groups, &window, count, pairs) {
                    Some(extra) => cards.extend(extra),
                    None => continue,
                }
            }
            if beats(cards.as_slice()) {
                return Some(cards);
            }
        }
    }
    if let Some(bomb) = groups
        .iter()
        .filter(|(_, cs)| cs.len() == 4)
        .map(|(_, cs)| cs.clone())
        .find(|cs| beats(cs.as_slice()))
    {
        return Some(bomb);
    }
    let rocket = pool
        .iter()
        .filter(|c| c.rank().is_joker())
        .copied()
        .collect::<Vec<_>>();
    (rocket.len() == 2 && beats(rocket.as_slice())).then_some(rocket)
}

/// Cards grouped by rank, ordered by ruleset value.
fn group(cards: &[Card], rules: &dyn Rules) -> Vec<(Rank, Vec<Card>)> {
    let mut groups = Vec::<(Rank, Vec<Card>)>::new();
    for card in cards {
        match groups.iter_mut().find(|(r, _)| *r == card.logical()) {
            Some((_, cs)) => cs.push(*card),
            None => groups.push((card.logical(), vec![*card])),
        }
    }
    groups.sort_by_key(|(r, _)| rules.value(*r));
    groups
}

/// Runs of `mains` ranks each holding at least `size` cards, lowest first.
fn windows(
    groups: &[(Rank, Vec<Card>)],
    size: usize,
    mains: usize,
    rules: &dyn Rules,
) -> Vec<Vec<Rank>> {
    let ranks = groups
        .iter()
        .filter(|(_, cs)| cs.len() >= size)
        .map(|(r, _)| *r)
        .collect::<Vec<_>>();
    match mains {
        0 => Vec::new(),
        1 => ranks.into_iter().map(|r| vec![r]).collect(),
        m => ranks
            .windows(m)
            .filter(|w| rules.is_straight(w, size))
            .map(|w| w.to_vec())
            .collect(),
    }
}

/// Lowest attachments outside `window`: `count` singles or `count` pairs.
fn wings(
    groups: &[(Rank, Vec<Card>)],
    window: &[Rank],
    count: usize,
    pairs: bool,
) -> Option<Vec<Card>> {
    let rest = groups.iter().filter(|(r, _)| !window.contains(r));
    let cards = match pairs {
        true => rest
            .filter(|(_, cs)| cs.len() >= 2)
            .take(count)
            .flat_map(|(_, cs)| cs.iter().take(2).copied())
            .collect::<Vec<_>>(),
        false => rest
            .flat_map(|(_, cs)| cs.iter().copied())
            .take(count)
            .collect::<Vec<_>>(),
    };
    let needed = if pairs { count * 2 } else { count };
    (cards.len() == needed).then_some(cards)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::faces::Classic;
    use crate::faces::Kind;
    use crate::faces::RunFast;

    fn face(cards: &str) -> Face {
        let hand = Hand::try_from(cards).unwrap();
        parse(hand.cards(), &Classic).remove(0).face
    }

    fn hinted(hand: &str, last: &str) -> Option<Kind> {
        let hand = Hand::try_from(hand).unwrap();
        let last = face(last);
        hint(&hand, Some(&last), &Classic).map(|cards| {
            parse(&cards, &Classic)
                .into_iter()
                .find(|c| c.face.beats(&last))
                .unwrap()
                .face
                .kind()
        })
    }

    #[test]
    fn leads_lowest_single() {
        let hand = Hand::try_from("9c 3d Ks").unwrap();
        let cards = hint(&hand, None, &Classic).unwrap();
        assert_eq!(cards[0].rank(), Rank::Three);
    }

    #[test]
    fn follows_with_same_shape() {
        assert_eq!(hinted("4c 9d 9h Ks", "8c 8d"), Some(Kind::Pair));
        assert_eq!(hinted("4c 5d 6h 7s 8c 9d", "3c 4d 5h 6s 7c"), Some(Kind::Straight));
        assert_eq!(hinted("9c 9d 9h 4s", "8c 8d 8h 3s"), Some(Kind::TripleSingle));
    }

    #[test]
    fn falls_back_to_bombs() {
        assert_eq!(hinted("4c 4d 4h 4s 5c", "2c 2d"), Some(Kind::Bomb));
        assert_eq!(hinted("X D 5c", "Ac Ad Ah As"), Some(Kind::Rocket));
    }

    #[test]
    fn nothing_beats_a_rocket() {
        assert_eq!(hinted("2c 2d 2h 2s", "X D"), None);
    }

    #[test]
    fn no_answer_when_too_weak() {
        assert_eq!(hinted("3c 4d 5h", "Kc"), None);
        let hand = Hand::try_from("3c 3d").unwrap();
        let last = face("9c 9d");
        assert!(hint(&hand, Some(&last), &RunFast).is_none());
    }
}
