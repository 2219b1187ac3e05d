//! Fixed practice-content pools and selection logic for the action groups.
//!
//! The pools are literal deployment content; selection composition (two
//! basic, two medium, one hard sentence; two JAM topics from distinct
//! difficulty tiers) is part of the contract.

use rand::seq::SliceRandom;
use rand::Rng;

pub const BASIC_SENTENCES: &[&str] = &[
    "The quick brown fox jumps over the lazy dog.",
    "She sells seashells by the seashore.",
    "Peter Piper picked a peck of pickled peppers.",
    "How much wood would a woodchuck chuck if a woodchuck could chuck wood?",
    "Red leather, yellow leather, red leather, yellow leather.",
    "A big black bug bit a big black bear.",
    "Six sick slick slim sycamore saplings.",
    "Betty Botter bought some butter but the butter was bitter.",
    "Unique New York, you know you need unique New York.",
    "The thirty-three thieves thought they thrilled the throne.",
    "Toy boat, toy boat, toy boat.",
    "Fresh fried fish, fish fresh fried.",
    "Good blood, bad blood.",
    "A proper copper coffee pot.",
    "Can you can a can as a canner can can a can?",
    "I saw Susie sitting in a shoeshine shop.",
    "How can a clam cram in a clean cream can?",
];

pub const MEDIUM_SENTENCES: &[&str] = &[
    "The sophisticated entrepreneur successfully established extraordinary enterprises.",
    "International organizations coordinate collaborative environmental initiatives worldwide.",
    "Professional photographers capture breathtaking landscapes with precision and creativity.",
    "Educational institutions implement innovative pedagogical approaches for development.",
    "Technological advancements revolutionize communication systems across global networks.",
    "Archaeological expeditions uncover fascinating historical artifacts from ancient civilizations.",
    "Pharmaceutical companies develop therapeutic treatments through rigorous clinical trials.",
    "Meteorological phenomena influence agricultural productivity and economic stability.",
    "Architectural masterpieces demonstrate exceptional engineering and aesthetic principles.",
    "Conscientious scientists consistently conduct comprehensive research methodologies.",
    "Manufacturing industries utilize sophisticated automation technologies for efficiency.",
    "Environmental conservation requires collaborative international cooperation and commitment.",
    "Financial institutions provide comprehensive investment advisory services globally.",
    "Transportation infrastructure development requires substantial governmental investment.",
    "Healthcare professionals demonstrate exceptional dedication to patient care.",
    "Academic researchers publish groundbreaking discoveries in scientific journals.",
];

pub const HARD_SENTENCES: &[&str] = &[
    "The inexorable proliferation of technological innovations necessitates comprehensive regulatory frameworks.",
    "Multidisciplinary collaboration facilitates unprecedented breakthroughs in biomedical research paradigms.",
    "Socioeconomic disparities exacerbate systemic inequalities within contemporary democratic institutions.",
    "Epistemological considerations regarding consciousness remain fundamentally contentious among philosophers.",
    "Neuroplasticity research demonstrates remarkable adaptability within human cognitive architectures.",
    "Geopolitical ramifications of climate change require multilateral diplomatic negotiations.",
    "Quantum mechanical phenomena challenge conventional understanding of deterministic processes.",
    "Psycholinguistic studies reveal intricate relationships between language acquisition and cognition.",
    "Biotechnological applications in agriculture raise ethical questions about genetic modification.",
    "Phenomenological approaches to consciousness studies emphasize subjective experiential dimensions.",
    "Macroeconomic fluctuations significantly influence microeconomic decision-making processes.",
    "Interdisciplinary methodologies enhance comprehensive understanding of complex phenomena.",
    "Constitutional jurisprudence establishes fundamental principles governing democratic societies.",
    "Anthropological investigations illuminate cultural diversity across human civilizations.",
    "Philosophical epistemology examines fundamental questions about knowledge and reality.",
    "Computational linguistics advances natural language processing capabilities significantly.",
    "Biochemical processes regulate physiological functions within living organisms.",
];

pub const EASY_TOPICS: &[&str] = &[
    "My favorite hobby",
    "A day in my life",
    "My best friend",
    "My favorite food",
    "A memorable vacation",
];

pub const MEDIUM_TOPICS: &[&str] = &[
    "Social media impact on youth",
    "Online education vs traditional education",
    "Climate change solutions",
    "Work-life balance",
    "Technology in healthcare",
];

pub const ADVANCED_TOPICS: &[&str] = &[
    "Artificial intelligence ethics",
    "Cryptocurrency and future economy",
    "Space exploration priorities",
    "Genetic engineering implications",
    "Quantum computing revolution",
];

/// Five practice sentences: two basic, two medium, one hard, in randomized
/// positional order.
pub fn pronunciation_sentences<R: Rng + ?Sized>(rng: &mut R) -> Vec<&'static str> {
    let mut selected: Vec<&'static str> = BASIC_SENTENCES
        .choose_multiple(rng, 2)
        .copied()
        .chain(MEDIUM_SENTENCES.choose_multiple(rng, 2).copied())
        .chain(HARD_SENTENCES.choose_multiple(rng, 1).copied())
        .collect();
    selected.shuffle(rng);
    selected
}

/// Two JAM topics drawn from two distinct difficulty tiers.
pub fn jam_topics<R: Rng + ?Sized>(rng: &mut R) -> (&'static str, &'static str) {
    let tiers: [&[&str]; 3] = [EASY_TOPICS, MEDIUM_TOPICS, ADVANCED_TOPICS];
    let chosen: Vec<_> = tiers.choose_multiple(rng, 2).collect();
    let first = chosen[0].choose(rng).copied().expect("tier pool is non-empty");
    let second = chosen[1].choose(rng).copied().expect("tier pool is non-empty");
    (first, second)
}

/// Rendered body for the pronunciation action group.
pub fn pronunciation_body<R: Rng + ?Sized>(rng: &mut R) -> String {
    let sentences = pronunciation_sentences(rng);
    let mut body = String::from("Here are your pronunciation sentences:");
    for (i, sentence) in sentences.iter().enumerate() {
        body.push_str(&format!("\nSentence {}: {}", i + 1, sentence));
    }
    body
}

/// Rendered body for the JAM topic action group.
pub fn jam_body<R: Rng + ?Sized>(rng: &mut R) -> String {
    let (topic1, topic2) = jam_topics(rng);
    format!(
        "Here are your JAM topics:\nTopic 1: {}\nTopic 2: {}",
        topic1, topic2
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_in(pool: &[&str], selected: &[&'static str]) -> usize {
        selected.iter().filter(|s| pool.contains(*s)).count()
    }

    #[test]
    fn pronunciation_composition_is_two_two_one() {
        let mut rng = rand::thread_rng();
        for _ in 0..200 {
            let selected = pronunciation_sentences(&mut rng);
            assert_eq!(selected.len(), 5);
            assert_eq!(count_in(BASIC_SENTENCES, &selected), 2);
            assert_eq!(count_in(MEDIUM_SENTENCES, &selected), 2);
            assert_eq!(count_in(HARD_SENTENCES, &selected), 1);
        }
    }

    #[test]
    fn pronunciation_sentences_are_distinct() {
        let mut rng = rand::thread_rng();
        for _ in 0..200 {
            let mut selected = pronunciation_sentences(&mut rng);
            selected.sort_unstable();
            selected.dedup();
            assert_eq!(selected.len(), 5);
        }
    }

    #[test]
    fn jam_topics_come_from_distinct_tiers() {
        let tiers: [&[&str]; 3] = [EASY_TOPICS, MEDIUM_TOPICS, ADVANCED_TOPICS];
        let tier_of = |topic: &str| {
            tiers
                .iter()
                .position(|tier| tier.contains(&topic))
                .expect("topic belongs to a tier")
        };

        let mut rng = rand::thread_rng();
        for _ in 0..200 {
            let (first, second) = jam_topics(&mut rng);
            assert_ne!(tier_of(first), tier_of(second));
        }
    }

    #[test]
    fn bodies_use_the_wire_formats() {
        let mut rng = rand::thread_rng();

        let body = pronunciation_body(&mut rng);
        assert!(body.starts_with("Here are your pronunciation sentences:"));
        assert_eq!(body.matches("\nSentence ").count(), 5);

        let body = jam_body(&mut rng);
        assert!(body.starts_with("Here are your JAM topics:"));
        assert!(body.contains("\nTopic 1: "));
        assert!(body.contains("\nTopic 2: "));
    }
}
