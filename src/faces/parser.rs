use super::face::Face;
use super::kind::Kind;
use super::rules::Rules;
use crate::cards::Card;
use crate::cards::Rank;

/// One way of reading a play: the recognised face together with the cards
/// as they would be committed, wildcards bound to the ranks they stand for.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub face: Face,
    pub cards: Vec<Card>,
}

/// Every face `cards` can be read as under `rules`, strongest first.
///
/// Bound wildcards play as their bound rank. Free wildcards are tried as
/// every suited rank; each binding that produces a face yields a candidate.
/// An empty result means the cards form no legal combination.
pub fn parse(cards: &[Card], rules: &dyn Rules) -> Vec<Candidate> {
    let free = cards
        .iter()
        .enumerate()
        .filter(|(_, c)| c.is_free())
        .map(|(i, _)| i)
        .collect::<Vec<_>>();
    let mut candidates = Vec::<Candidate>::new();
    for binding in bindings(free.len()) {
        let mut bound = cards.to_vec();
        free.iter()
            .zip(binding.iter())
            .for_each(|(i, rank)| bound[*i] = bound[*i].bind(*rank));
        let ranks = bound.iter().map(Card::logical).collect::<Vec<_>>();
        for face in shapes(&ranks, rules) {
            if candidates.iter().all(|c| c.face != face) {
                candidates.push(Candidate {
                    face,
                    cards: bound.clone(),
                });
            }
        }
    }
    candidates.sort_by(|a, b| {
        b.face
            .kind()
            .is_bomb()
            .cmp(&a.face.kind().is_bomb())
            .then(b.face.strength().cmp(&a.face.strength()))
    });
    candidates
}

/// Non-decreasing assignments of `k` free wildcards to suited ranks.
fn bindings(k: usize) -> Vec<Vec<Rank>> {
    let ranks = Rank::suited().collect::<Vec<_>>();
    let mut out = vec![Vec::new()];
    for _ in 0..k {
        out = out
            .into_iter()
            .flat_map(|prefix| {
                let from = prefix
                    .last()
                    .and_then(|r| ranks.iter().position(|x| x == r))
                    .unwrap_or(0);
                ranks[from..].iter().map(move |r| {
                    let mut next = prefix.clone();
                    next.push(*r);
                    next
                })
            })
            .collect();
    }
    out
}

/// Faces a multiset of logical ranks can be read as.
pub fn shapes(ranks: &[Rank], rules: &dyn Rules) -> Vec<Face> {
    let n = ranks.len();
    let counts = tally(ranks, rules);
    let distinct = counts.iter().map(|(r, _)| *r).collect::<Vec<_>>();
    let uniform = |k: usize| counts.iter().all(|(_, c)| *c == k);
    let face = |kind: Kind, mains: Vec<Rank>| {
        let top = mains.iter().map(|r| rules.value(*r)).max().unwrap_or_default();
        Face::new(kind, mains, n, top)
    };
    let mut faces = Vec::new();
    match (n, counts.as_slice()) {
        (1, [(r, 1)]) => faces.push(face(Kind::Single, vec![*r])),
        (2, [(r, 2)]) => faces.push(face(Kind::Pair, vec![*r])),
        (2, [(Rank::Little, 1), (Rank::Big, 1)]) => {
            faces.push(face(Kind::Rocket, vec![Rank::Little, Rank::Big]))
        }
        (3, [(r, 3)]) => faces.push(face(Kind::Triple, vec![*r])),
        (4, [(r, 4)]) => faces.push(face(Kind::Bomb, vec![*r])),
        _ => {}
    }
    if n == 4 && counts.len() == 2 {
        counts
            .iter()
            .filter(|(_, c)| *c == 3)
            .for_each(|(r, _)| faces.push(face(Kind::TripleSingle, vec![*r])));
    }
    if n == 5 && counts.len() == 2 && counts.iter().any(|(_, c)| *c == 2) {
        counts
            .iter()
            .filter(|(_, c)| *c == 3)
            .for_each(|(r, _)| faces.push(face(Kind::TriplePair, vec![*r])));
    }
    if n == 6 {
        counts
            .iter()
            .filter(|(_, c)| *c == 4)
            .for_each(|(r, _)| faces.push(face(Kind::FourSingles, vec![*r])));
    }
    if n == 8 {
        for (r, _) in counts.iter().filter(|(_, c)| *c == 4) {
            if counts.iter().filter(|(x, _)| x != r).all(|(_, c)| c % 2 == 0) {
                faces.push(face(Kind::FourPairs, vec![*r]));
            }
        }
    }
    if uniform(1) && rules.is_straight(&distinct, 1) {
        faces.push(face(Kind::Straight, distinct.clone()));
    }
    if uniform(2) && rules.is_straight(&distinct, 2) {
        faces.push(face(Kind::PairStraight, distinct.clone()));
    }
    if uniform(3) && rules.is_straight(&distinct, 3) {
        faces.push(face(Kind::Plane, distinct.clone()));
    }
    let triples = counts
        .iter()
        .filter(|(_, c)| *c >= 3)
        .map(|(r, _)| *r)
        .collect::<Vec<_>>();
    for m in 2..=n / 4 {
        for window in triples.windows(m) {
            if !rules.is_straight(window, 3) {
                continue;
            }
            let rest = counts
                .iter()
                .map(|(r, c)| if window.contains(r) { c - 3 } else { *c })
                .collect::<Vec<_>>();
            if n == 4 * m {
                faces.push(face(Kind::PlaneSingles, window.to_vec()));
            }
            if n == 5 * m && rest.iter().all(|c| c % 2 == 0) {
                faces.push(face(Kind::PlanePairs, window.to_vec()));
            }
        }
    }
    faces.retain(|f| rules.allows(f.kind()));
    faces
}

/// (rank, count) pairs ordered by ruleset value.
fn tally(ranks: &[Rank], rules: &dyn Rules) -> Vec<(Rank, usize)> {
    let mut counts = Vec::<(Rank, usize)>::new();
    for rank in ranks {
        match counts.iter_mut().find(|(r, _)| r == rank) {
            Some((_, c)) => *c += 1,
            None => counts.push((*rank, 1)),
        }
    }
    counts.sort_by_key(|(r, _)| rules.value(*r));
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Hand;
    use crate::faces::Classic;
    use crate::faces::RunFast;

    fn kinds(cards: &str, rules: &dyn Rules) -> Vec<Kind> {
        let hand = Hand::try_from(cards).unwrap();
        parse(hand.cards(), rules)
            .into_iter()
            .map(|c| c.face.kind())
            .collect()
    }

    #[test]
    fn basic_shapes() {
        assert_eq!(kinds("3c", &Classic), vec![Kind::Single]);
        assert_eq!(kinds("3c 3d", &Classic), vec![Kind::Pair]);
        assert_eq!(kinds("X D", &Classic), vec![Kind::Rocket]);
        assert_eq!(kinds("3c 3d 3h", &Classic), vec![Kind::Triple]);
        assert_eq!(kinds("3c 3d 3h 3s", &Classic), vec![Kind::Bomb]);
        assert_eq!(kinds("3c 3d 3h 9s", &Classic), vec![Kind::TripleSingle]);
        assert_eq!(kinds("3c 3d 3h 9s 9c", &Classic), vec![Kind::TriplePair]);
    }

    #[test]
    fn rejected_shapes() {
        assert!(kinds("3c 4d", &Classic).is_empty());
        assert!(kinds("3c 4d 5h 6s 8c", &Classic).is_empty());
        assert!(kinds("Jc Qd Kh As 2c", &Classic).is_empty());
        assert!(kinds("3c 3d 4h 4s", &Classic).is_empty());
    }

    #[test]
    fn chains() {
        assert_eq!(kinds("3c 4d 5h 6s 7c", &Classic), vec![Kind::Straight]);
        assert_eq!(
            kinds("3c 3d 4h 4s 5c 5d", &Classic),
            vec![Kind::PairStraight]
        );
        assert_eq!(kinds("3c 3d 3h 4s 4c 4d", &Classic), vec![Kind::Plane]);
        assert_eq!(kinds("3c 3d 4h 4s", &RunFast), vec![Kind::PairStraight]);
    }

    #[test]
    fn planes_with_wings() {
        assert_eq!(
            kinds("3c 3d 3h 4s 4c 4d 9c Jd", &Classic),
            vec![Kind::PlaneSingles]
        );
        assert_eq!(
            kinds("3c 3d 3h 4s 4c 4d 9c 9d Jd Jh", &Classic),
            vec![Kind::PlanePairs]
        );
    }

    #[test]
    fn four_with_attachments() {
        assert_eq!(kinds("5c 5d 5h 5s 9c Jd", &Classic), vec![Kind::FourSingles]);
        assert_eq!(
            kinds("5c 5d 5h 5s 9c 9d Jd Jh", &Classic),
            vec![Kind::FourPairs]
        );
        assert!(kinds("5c 5d 5h 5s 9c Jd", &RunFast).is_empty());
    }

    #[test]
    fn ambiguous_plane_has_several_readings() {
        let found = kinds("3c 3d 3h 4c 4d 4h 5c 5d 5h 6c 6d 6h", &Classic);
        assert!(found.contains(&Kind::Plane));
        assert!(found.contains(&Kind::PlaneSingles));
    }

    #[test]
    fn free_wildcard_completes_a_straight() {
        let mut hand = Hand::try_from("3c 4d 5h 7c 9s").unwrap();
        hand.flag(Rank::Nine);
        let candidates = parse(hand.cards(), &Classic);
        let straight = candidates
            .iter()
            .find(|c| c.face.kind() == Kind::Straight)
            .unwrap();
        let wild = straight.cards.iter().find(|c| c.is_wild()).unwrap();
        assert_eq!(wild.logical(), Rank::Six);
    }

    #[test]
    fn bound_wildcard_is_not_enumerated() {
        let mut hand = Hand::try_from("3c 3d 9s").unwrap();
        hand.flag(Rank::Nine);
        let mut cards = hand.cards().to_vec();
        cards[2] = cards[2].bind(Rank::Three);
        let candidates = parse(&cards, &Classic);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].face.kind(), Kind::Triple);
    }

    #[test]
    fn bindings_are_multisets() {
        assert_eq!(bindings(0).len(), 1);
        assert_eq!(bindings(1).len(), 13);
        assert_eq!(bindings(2).len(), 91);
    }
}
