/// How a text literal is decomposed into animatable units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitMode {
    /// One unit per non-whitespace character.
    #[default]
    Chars,
    /// One unit per non-empty line.
    Lines,
}

/// Horizontal side a unit slides in from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SideBias {
    Left,
    Right,
}

impl SideBias {
    /// Even indices enter from the left, odd ones from the right.
    pub fn for_index(index: usize) -> Self {
        if index % 2 == 0 { Self::Left } else { Self::Right }
    }

    /// `-1.0` for left, `1.0` for right.
    pub fn sign(self) -> f64 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TextUnit {
    pub sequence_index: usize,
    pub text: String,
    pub side_bias: SideBias,
}

pub fn split_text(text: &str, mode: SplitMode) -> Vec<TextUnit> {
    let pieces: Vec<String> = match mode {
        SplitMode::Chars => text
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(String::from)
            .collect(),
        SplitMode::Lines => text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(String::from)
            .collect(),
    };
    pieces
        .into_iter()
        .enumerate()
        .map(|(sequence_index, text)| TextUnit {
            sequence_index,
            text,
            side_bias: SideBias::for_index(sequence_index),
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/scene/text.rs"]
mod tests;
