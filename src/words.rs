use anyhow::{bail, Context};
use clap::ValueEnum;
use include_dir::{include_dir, Dir};
use serde::{Deserialize, Serialize};

static WORDS_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/words");

/// Difficulty tier, each bound to a fixed word pool
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    ValueEnum,
    Serialize,
    Deserialize,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    fn file_name(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy.json",
            Difficulty::Medium => "medium.json",
            Difficulty::Hard => "hard.json",
        }
    }

    /// One-line blurb shown above the tier's button
    pub fn description(self, words: usize) -> String {
        let flavour = match self {
            Difficulty::Easy => "simple",
            Difficulty::Medium => "intermediate",
            Difficulty::Hard => "challenging",
        };
        format!("{self} - {words} {flavour} words")
    }
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct WordPool {
    pub name: String,
    pub size: u32,
    pub words: Vec<String>,
}

impl WordPool {
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.words.is_empty() {
            bail!("word pool '{}' is empty", self.name);
        }
        if self.size as usize != self.words.len() {
            bail!(
                "word pool '{}' declares {} words but lists {}",
                self.name,
                self.size,
                self.words.len()
            );
        }
        if let Some(bad) = self
            .words
            .iter()
            .find(|w| w.is_empty() || !w.chars().all(|c| c.is_alphabetic() && c.is_lowercase()))
        {
            bail!("word pool '{}' contains invalid word {bad:?}", self.name);
        }
        Ok(())
    }
}

/// The three immutable pools, one per tier
#[derive(Clone, Debug, PartialEq)]
pub struct WordPools {
    easy: WordPool,
    medium: WordPool,
    hard: WordPool,
}

impl WordPools {
    /// Pools compiled into the binary
    pub fn embedded() -> anyhow::Result<Self> {
        Ok(Self {
            easy: read_pool(Difficulty::Easy.file_name())?,
            medium: read_pool(Difficulty::Medium.file_name())?,
            hard: read_pool(Difficulty::Hard.file_name())?,
        })
    }

    pub fn from_lists(
        easy: Vec<String>,
        medium: Vec<String>,
        hard: Vec<String>,
    ) -> anyhow::Result<Self> {
        let pool = |name: &str, words: Vec<String>| WordPool {
            name: name.to_string(),
            size: words.len() as u32,
            words,
        };
        let pools = Self {
            easy: pool("easy", easy),
            medium: pool("medium", medium),
            hard: pool("hard", hard),
        };
        for difficulty in Difficulty::ALL {
            pools.get(difficulty).validate()?;
        }
        Ok(pools)
    }

    pub fn get(&self, difficulty: Difficulty) -> &WordPool {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Hard => &self.hard,
        }
    }
}

fn read_pool(file_name: &str) -> anyhow::Result<WordPool> {
    let file = WORDS_DIR
        .get_file(file_name)
        .with_context(|| format!("word pool {file_name} not embedded"))?;

    let contents = file
        .contents_utf8()
        .with_context(|| format!("word pool {file_name} is not valid utf-8"))?;

    let pool: WordPool = serde_json::from_str(contents)
        .with_context(|| format!("unable to deserialize word pool {file_name}"))?;
    pool.validate()?;

    Ok(pool)
}
