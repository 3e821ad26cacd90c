//! Mini-game registry: catalog lookup and widget factories.
//!
//! The `MiniGameRegistry` stores every `MiniGameDefinition` in catalog
//! order and, separately, the factory that builds each implemented
//! widget. A definition without a factory is still part of the catalog
//! but is left out of `implemented()`.

use rustc_hash::FxHashMap;

use super::definition::{Difficulty, MiniGameDefinition, MiniGameId};
use crate::core::GateRng;
use crate::widgets::games::{
    BasicAgree, ChessBoard, Clicker, ColorMatch, DodgeGame, DragDrop, EscapeButton, LongPress,
    MathQuiz, Maze, MemoryGame, RapidClick, ReflexTest, RhythmGame, SlidePuzzle, SlotMachine,
    TimingGame, TwoChoiceQuiz, WordSearch,
};
use crate::widgets::{Completion, MiniGame, Placeholder, WidgetProps};

/// Builds a widget for one mount.
pub type WidgetFactory = fn(WidgetProps, Completion, GateRng) -> Box<dyn MiniGame>;

/// Registry of mini-game definitions and widget factories.
///
/// ## Example
///
/// ```
/// use consent_gate::catalog::{MiniGameId, MiniGameRegistry};
///
/// let registry = MiniGameRegistry::standard();
///
/// assert_eq!(registry.len(), 20);
/// assert!(registry.has_widget(MiniGameId::Maze));
/// assert!(!registry.has_widget(MiniGameId::FinalChallenge));
/// assert_eq!(registry.implemented().count(), 19);
/// ```
#[derive(Clone, Debug, Default)]
pub struct MiniGameRegistry {
    definitions: FxHashMap<MiniGameId, MiniGameDefinition>,
    order: Vec<MiniGameId>,
    widgets: FxHashMap<MiniGameId, WidgetFactory>,
}

macro_rules! factory {
    ($widget:ty) => {
        |props, completion, rng| Box::new(<$widget>::new(props, completion, rng))
    };
}

impl MiniGameRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The full 20-game catalog with every implemented widget.
    #[must_use]
    pub fn standard() -> Self {
        use Difficulty::{Easy, Hard, Medium};
        use MiniGameId as G;

        let mut registry = Self::new();
        let mut add = |id, name: &str, description: &str, difficulty, limit: Option<u32>| {
            let mut def = MiniGameDefinition::new(id, name, difficulty).with_description(description);
            def.time_limit = limit;
            registry.register(def);
        };

        add(G::BasicAgree, "Basic Consent", "Click the \"I agree\" button", Easy, None);
        add(G::EscapeButton, "Runaway Consent", "Catch the button that runs from your pointer", Medium, Some(30));
        add(G::TimingGame, "Timed Consent", "Click while the gauge is in the green", Medium, None);
        add(G::RapidClick, "Rapid Consent", "Mash the button to fill the gauge in time", Easy, Some(10));
        add(G::SlotMachine, "Slot Consent", "Line up three matching symbols", Medium, None);
        add(G::SlidePuzzle, "Slide Puzzle", "Put the tiles back in order", Hard, Some(60));
        add(G::Maze, "Maze", "Walk to the goal", Medium, Some(45));
        add(G::MemoryGame, "Memory Test", "Repeat the order the tiles lit up in", Medium, None);
        add(G::ReflexTest, "Reflexes", "Click the moment the button lights up", Medium, Some(20));
        add(G::MathQuiz, "Arithmetic", "Type the answer to a simple sum", Easy, Some(20));
        add(G::LongPress, "Long Press", "Hold the button for three seconds", Easy, None);
        add(G::TwoChoiceQuiz, "Two-Choice Quiz", "Pick the right answer", Easy, None);
        add(G::ColorMatch, "Color Match", "Pick the requested colour", Easy, None);
        add(G::WordSearch, "Word Search", "Find the consent keyword in the grid", Medium, Some(20));
        add(G::DragDrop, "Drag and Drop", "Drop the right item on the target", Medium, None);
        add(G::RhythmGame, "Rhythm Game", "Hit the notes on the beat", Hard, Some(30));
        add(G::DodgeGame, "Dodge", "Avoid the falling obstacles", Medium, Some(25));
        add(G::Clicker, "Clicker", "Click ten times", Easy, None);
        add(G::ChessBoard, "Chess Board", "Find the four knights", Medium, None);
        add(G::FinalChallenge, "Final Trial", "Clear several challenges in a row", Hard, Some(40));

        registry.register_widget(G::BasicAgree, factory!(BasicAgree));
        registry.register_widget(G::EscapeButton, factory!(EscapeButton));
        registry.register_widget(G::TimingGame, factory!(TimingGame));
        registry.register_widget(G::RapidClick, factory!(RapidClick));
        registry.register_widget(G::SlotMachine, factory!(SlotMachine));
        registry.register_widget(G::SlidePuzzle, factory!(SlidePuzzle));
        registry.register_widget(G::Maze, factory!(Maze));
        registry.register_widget(G::MemoryGame, factory!(MemoryGame));
        registry.register_widget(G::ReflexTest, factory!(ReflexTest));
        registry.register_widget(G::MathQuiz, factory!(MathQuiz));
        registry.register_widget(G::LongPress, factory!(LongPress));
        registry.register_widget(G::TwoChoiceQuiz, factory!(TwoChoiceQuiz));
        registry.register_widget(G::ColorMatch, factory!(ColorMatch));
        registry.register_widget(G::WordSearch, factory!(WordSearch));
        registry.register_widget(G::DragDrop, factory!(DragDrop));
        registry.register_widget(G::RhythmGame, factory!(RhythmGame));
        registry.register_widget(G::DodgeGame, factory!(DodgeGame));
        registry.register_widget(G::Clicker, factory!(Clicker));
        registry.register_widget(G::ChessBoard, factory!(ChessBoard));

        registry
    }

    /// Register a definition.
    ///
    /// Panics if a definition with the same ID already exists.
    pub fn register(&mut self, definition: MiniGameDefinition) {
        if self.definitions.contains_key(&definition.id) {
            panic!("Mini-game {} already registered", definition.id);
        }
        self.order.push(definition.id);
        self.definitions.insert(definition.id, definition);
    }

    /// Attach (or replace) the widget factory for `id`.
    pub fn register_widget(&mut self, id: MiniGameId, factory: WidgetFactory) {
        self.widgets.insert(id, factory);
    }

    /// Get a definition by ID.
    #[must_use]
    pub fn get(&self, id: MiniGameId) -> Option<&MiniGameDefinition> {
        self.definitions.get(&id)
    }

    /// Check if a definition is registered.
    #[must_use]
    pub fn contains(&self, id: MiniGameId) -> bool {
        self.definitions.contains_key(&id)
    }

    /// Check if `id` is in the catalog and has a widget.
    #[must_use]
    pub fn has_widget(&self, id: MiniGameId) -> bool {
        self.contains(id) && self.widgets.contains_key(&id)
    }

    /// Every definition, in registration order.
    pub fn definitions(&self) -> impl Iterator<Item = &MiniGameDefinition> {
        self.order.iter().filter_map(|id| self.definitions.get(id))
    }

    /// Definitions that have a widget, in registration order.
    ///
    /// Sessions are built from this list.
    pub fn implemented(&self) -> impl Iterator<Item = &MiniGameDefinition> {
        self.definitions()
            .filter(|def| self.widgets.contains_key(&def.id))
    }

    /// Alias for `definitions()`.
    pub fn iter(&self) -> impl Iterator<Item = &MiniGameDefinition> {
        self.definitions()
    }

    /// Number of definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Build the widget for `id`.
    ///
    /// Falls back to a `Placeholder` (logged at warn) when no widget is
    /// registered. Never panics.
    pub fn mount(
        &self,
        id: MiniGameId,
        props: WidgetProps,
        completion: Completion,
        rng: GateRng,
    ) -> Box<dyn MiniGame> {
        match self.widgets.get(&id) {
            Some(factory) => factory(props, completion, rng),
            None => Box::new(Placeholder::new(id, completion)),
        }
    }
}
