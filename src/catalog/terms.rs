//! The mock terms of service shown alongside the opening games.
//!
//! Article `n` is displayed while game `n` of the sequence is played.
//! Later games show none.

/// One article of the terms.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConsentArticle {
    /// Article number as displayed.
    pub article: &'static str,
    pub title: &'static str,
    pub items: &'static [&'static str],
}

/// All articles, in display order.
pub static TERMS: [ConsentArticle; 3] = [
    ConsentArticle {
        article: "Article 1",
        title: "The user's attitude",
        items: &[
            "(1) The user approaches this game ready to enjoy it.",
            "(2) The user vows not to complain even if the portfolio behind the gate is a rushed, modest one.",
            "(3) The user stays in good humour and keeps consenting until the very end.",
            "(4) The user will read every following article of these terms.",
        ],
    },
    ConsentArticle {
        article: "Article 2",
        title: "Consideration for the developer",
        items: &[
            "(1) The user respects the developer's effort while playing.",
            "(2) The user understands the developer is human and overlooks small bugs and typos.",
            "(3) The user keeps any message to the developer gentle.",
            "(4) The user stays calm and logical even when raising a complaint.",
        ],
    },
    ConsentArticle {
        article: "Article 3",
        title: "Reporting defects",
        items: &[
            "(1) The user reports small bugs to the developer without taunting.",
            "(2) The user vows to point out vulnerabilities in a measured tone.",
            "(3) The user adds reproduction steps where known.",
            "(4) The user suggests an alternative along with any improvement request.",
        ],
    },
];

/// The article shown with game `index` of the sequence, if any.
#[must_use]
pub fn article_for(index: usize) -> Option<&'static ConsentArticle> {
    TERMS.get(index)
}
