//! Violet Transaction Demo.
//!
//! Minimaler Host: baut ein Transaction-System mit dem GUI-Store auf und
//! spielt eine feste Folge von Widget-Eingaben Tick für Tick ab.

use violet_transaction::app::active;
use violet_transaction::gui::{
    spawn_gui_store, spawn_typed, ArrayOperation, GuiStore, ListOperation, SliderDrag,
    ToggleCheckbox, EVENT_KIND_GUI_ARR, EVENT_KIND_GUI_SLIDER, EVENT_KIND_GUI_TOGGLE_CHK,
    STORE_KIND_GUI,
};
use violet_transaction::{EventKind, TransactionOptions, TransactionSystem};

fn main() -> anyhow::Result<()> {
    AppRunner::run()
}

/// Eingabe eines Widgets innerhalb eines Ticks
#[derive(Debug, Clone, Copy)]
enum DemoInput {
    Toggle(bool),
    Slide(f32),
    Append(u32),
    Pop,
    Undo,
    Redo,
}

/// Feste Eingabefolge: Checkbox, Slider-Drag über mehrere Ticks, Listen-Edits,
/// anschließend Undo/Redo bis über den Horizont hinaus.
const SCRIPT: &[DemoInput] = &[
    DemoInput::Toggle(true),
    DemoInput::Slide(0.2),
    DemoInput::Slide(0.45),
    DemoInput::Slide(0.8),
    DemoInput::Append(3),
    DemoInput::Append(5),
    DemoInput::Pop,
    DemoInput::Undo,
    DemoInput::Undo,
    DemoInput::Undo,
    DemoInput::Redo,
    DemoInput::Undo,
    DemoInput::Undo,
    DemoInput::Undo,
    DemoInput::Redo,
    DemoInput::Redo,
    DemoInput::Redo,
    DemoInput::Redo,
    DemoInput::Redo,
];

struct AppRunner;

impl AppRunner {
    fn run() -> anyhow::Result<()> {
        let config_path = TransactionOptions::config_path();
        let options = TransactionOptions::load_from_file(&config_path);

        env_logger::Builder::from_default_env()
            .filter_level(options.log_level_filter())
            .init();

        log::info!(
            "Violet Transaction Demo v{} startet...",
            env!("CARGO_PKG_VERSION")
        );

        if std::env::args().any(|arg| arg == "--write-config") {
            options.save_to_file(&config_path)?;
        }

        let mut system = TransactionSystem::with_options(&options);
        spawn_gui_store(&mut system)?;
        if active::set_active(system).is_some() {
            log::warn!("Vorheriges Transaction-System ersetzt");
        }

        for (tick, input) in SCRIPT.iter().enumerate() {
            active::with_active(|sys| Self::apply_input(sys, *input)).transpose()?;
            let result = active::on_update().unwrap_or(EventKind::NOOP);
            Self::report_tick(tick, *input, result);
        }

        if let Some(system) = active::take_active() {
            Self::report_history(&system);
        }

        log::info!("Demo beendet");
        Ok(())
    }

    /// Übersetzt eine Widget-Eingabe in ein eingereihtes Event.
    fn apply_input(
        system: &mut TransactionSystem,
        input: DemoInput,
    ) -> anyhow::Result<()> {
        match input {
            DemoInput::Toggle(value) => {
                spawn_typed::<ToggleCheckbox>(system, EVENT_KIND_GUI_TOGGLE_CHK)?.value = value;
            }
            DemoInput::Slide(value) => {
                spawn_typed::<SliderDrag>(system, EVENT_KIND_GUI_SLIDER)?.value = value;
            }
            DemoInput::Append(value) => {
                let event = spawn_typed::<ArrayOperation>(system, EVENT_KIND_GUI_ARR)?;
                event.op = ListOperation::Append;
                event.value = Some(value);
            }
            DemoInput::Pop => {
                spawn_typed::<ArrayOperation>(system, EVENT_KIND_GUI_ARR)?.op = ListOperation::Pop;
            }
            DemoInput::Undo => system.spawn_undo(),
            DemoInput::Redo => system.spawn_redo(),
        }
        Ok(())
    }

    fn report_tick(tick: usize, input: DemoInput, result: EventKind) {
        let state = active::with_active(|sys| sys.store_data::<GuiStore>(STORE_KIND_GUI).clone());
        match state {
            Some(state) => log::info!(
                "Tick {:>2}: {:<14} -> {:<5} | chk={} slider={:.2} arr={:?}",
                tick,
                format!("{input:?}"),
                result.to_string(),
                state.chk,
                state.slider,
                state.arr
            ),
            None => log::warn!("Tick {tick}: kein aktives Transaction-System"),
        }
    }

    fn report_history(system: &TransactionSystem) {
        log::info!("History ({} Einträge):", system.history().len());
        for (index, event) in system.history().iter().enumerate() {
            log::info!("  {:>2}: {} ({})", index, event.description(), event.kind());
        }
    }
}
