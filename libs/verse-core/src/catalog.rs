//! Built-in verse set, used when no content file is configured.

use crate::types::{Difficulty, VerseRecord};

const VERSES: &[(&str, &str, &str, Difficulty, &str)] = &[
    (
        "jn-3-16",
        "Jean 3:16",
        "Amour",
        Difficulty::Easy,
        "Car Dieu a tant aimé le monde qu'il a donné son Fils unique, afin que quiconque croit en lui ne périsse point, mais qu'il ait la vie éternelle.",
    ),
    (
        "jn-14-6",
        "Jean 14:6",
        "Jésus",
        Difficulty::Easy,
        "Je suis le chemin, la vérité et la vie",
    ),
    (
        "ps-23-1",
        "Psaume 23:1",
        "Confiance",
        Difficulty::Easy,
        "L'Éternel est mon berger: je ne manquerai de rien.",
    ),
    (
        "php-4-13",
        "Philippiens 4:13",
        "Force",
        Difficulty::Easy,
        "Je puis tout par celui qui me fortifie.",
    ),
    (
        "mt-21-22",
        "Matthieu 21:22",
        "Prière",
        Difficulty::Medium,
        "Tout ce que vous demanderez avec foi par la prière, vous le recevrez",
    ),
    (
        "php-4-6",
        "Philippiens 4:6",
        "Paix",
        Difficulty::Medium,
        "Ne vous inquiétez de rien, mais en toute chose faites connaître vos besoins à Dieu",
    ),
    (
        "jc-4-8",
        "Jacques 4:8",
        "Relation avec Dieu",
        Difficulty::Medium,
        "Approchez-vous de Dieu et il s'approchera de vous",
    ),
    (
        "rm-8-28",
        "Romains 8:28",
        "Espérance",
        Difficulty::Medium,
        "Nous savons, du reste, que toutes choses concourent au bien de ceux qui aiment Dieu, de ceux qui sont appelés selon son dessein.",
    ),
    (
        "mt-11-28",
        "Matthieu 11:28",
        "Paix",
        Difficulty::Medium,
        "Venez à moi, vous tous qui êtes fatigués et chargés, et je vous donnerai du repos.",
    ),
    (
        "pr-3-5-6",
        "Proverbes 3:5-6",
        "Sagesse",
        Difficulty::Medium,
        "Confie-toi en l'Éternel de tout ton cœur, Et ne t'appuie pas sur ta sagesse; Reconnais-le dans toutes tes voies, Et il aplanira tes sentiers.",
    ),
    (
        "es-55-8",
        "Ésaïe 55:8",
        "Sagesse",
        Difficulty::Hard,
        "Car mes pensées ne sont pas vos pensées et vos voies ne sont pas mes voies",
    ),
    (
        "ps-91-1",
        "Psaume 91:1",
        "Protection",
        Difficulty::Hard,
        "Celui qui demeure sous l'abri du Très-Haut repose à l'ombre du Tout-Puissant",
    ),
    (
        "jr-29-11",
        "Jérémie 29:11",
        "Espérance",
        Difficulty::Hard,
        "Car je connais les projets que j'ai formés sur vous, dit l'Éternel, projets de paix et non de malheur, afin de vous donner un avenir et de l'espérance.",
    ),
    (
        "1co-13-4-5",
        "1 Corinthiens 13:4-5",
        "Amour",
        Difficulty::Hard,
        "La charité est patiente, elle est pleine de bonté; la charité n'est point envieuse; la charité ne se vante point, elle ne s'enfle point d'orgueil, elle ne fait rien de malhonnête, elle ne cherche point son intérêt, elle ne s'irrite point, elle ne soupçonne point le mal.",
    ),
];

pub fn default_verses() -> Vec<VerseRecord> {
    VERSES
        .iter()
        .map(|&(id, reference, theme, difficulty, text)| VerseRecord {
            id: id.to_string(),
            reference: reference.to_string(),
            text: text.to_string(),
            theme: theme.to_string(),
            difficulty,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exercise::word_tokens;
    use std::collections::HashSet;

    #[test]
    fn ids_are_unique() {
        let verses = default_verses();
        let ids: HashSet<_> = verses.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids.len(), verses.len());
    }

    #[test]
    fn every_level_is_represented() {
        let verses = default_verses();
        for level in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            assert!(verses.iter().any(|v| v.difficulty == level));
        }
    }

    #[test]
    fn every_verse_can_build_exercises() {
        for verse in default_verses() {
            assert!(!word_tokens(&verse.text).is_empty(), "{} has no words", verse.id);
        }
    }
}
