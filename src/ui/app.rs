use crate::config::Config;
use crate::events::{Dispatcher, Event};
use crate::picker::RangePicker;
use crate::selection::Selection;

use super::{BlockScroll, CalendarWindow, Context, Mode};

use unsegen::base::{Cursor, Terminal, Window};
use unsegen::input::{
    EditBehavior, Input, Key, Navigatable, NavigateBehavior, OperationResult, ScrollBehavior,
};
use unsegen::widget::*;

use super::command::CommandParser;

pub struct App {
    context: Context,
}

impl App {
    pub fn new(config: &Config, picker: RangePicker) -> App {
        let context = Context::new(config, picker);
        App { context }
    }

    pub fn selection(&self) -> &Selection {
        self.context.picker.selection()
    }

    fn bottom_bar<'w>(&'w self) -> impl Widget + 'w {
        let mut layout = VLayout::new();
        if let Mode::Command = self.context.mode {
            layout = layout.widget(self.context.command_line.as_widget());
        } else {
            layout = layout.widget(StatusBar(&self.context));
        }

        layout
    }

    fn as_widget<'w>(&'w self) -> impl Widget + 'w {
        VLayout::new()
            .widget(CalendarWindow::new(&self.context))
            .widget(self.bottom_bar())
    }

    fn handle_input(&mut self, input: Input) {
        if input.matches(Key::Esc) {
            self.context.mode = Mode::Normal;
            return;
        }

        match self.context.mode {
            Mode::Normal => {
                input
                    .chain((Key::Char('q'), || self.context.quit = true))
                    .chain((Key::Char(':'), || self.context.mode = Mode::Command))
                    .chain((Key::Char('\n'), || self.context.click_cursor()))
                    .chain((Key::Char(' '), || self.context.click_cursor()))
                    .chain((Key::Char('r'), || self.context.picker.reset_selected_dates()))
                    .chain((Key::Char('t'), || {
                        self.context.goto_today();
                    }))
                    .chain(
                        NavigateBehavior::new(&mut CursorBehaviour(&mut self.context))
                            .down_on(Key::Char('j'))
                            .up_on(Key::Char('k'))
                            .left_on(Key::Char('h'))
                            .right_on(Key::Char('l')),
                    )
                    .chain(
                        ScrollBehavior::new(&mut self.context.scroll)
                            .forwards_on(Key::Char('J'))
                            .backwards_on(Key::Char('K')),
                    )
                    .chain(
                        ScrollBehavior::new(&mut BlockScroll(&mut self.context.scroll))
                            .forwards_on(Key::PageDown)
                            .backwards_on(Key::PageUp),
                    )
                    .finish();
            }
            Mode::Command => {
                input
                    .chain(
                        EditBehavior::new(&mut self.context.command_line)
                            .delete_forwards_on(Key::Delete)
                            .delete_backwards_on(Key::Backspace)
                            .left_on(Key::Left)
                            .right_on(Key::Right),
                    )
                    .chain(
                        ScrollBehavior::new(&mut self.context.command_line)
                            .backwards_on(Key::Up)
                            .forwards_on(Key::Down),
                    )
                    .chain(CommandParser::new(&mut self.context))
                    .finish();
            }
        }
    }

    fn draw(&mut self, term: &mut Terminal) {
        let root = term.create_root_window();
        let calendar_rows = root.get_height().raw_value().max(1) as usize - 1;
        self.context.prepare_frame(calendar_rows);

        self.as_widget().draw(root, RenderingHints::new());
        term.present();
    }

    pub fn run(
        &mut self,
        dispatcher: Dispatcher,
        mut term: Terminal,
    ) -> Result<(), Box<dyn std::error::Error>> {
        self.draw(&mut term);

        while !self.context.quit {
            match dispatcher.next()? {
                Event::Update | Event::Resize => {}
                Event::Input(input) => self.handle_input(input),
            }

            self.draw(&mut term);
        }

        Ok(())
    }
}

struct StatusBar<'a>(&'a Context);

impl Widget for StatusBar<'_> {
    fn space_demand(&self) -> Demand2D {
        Demand2D {
            width: ColDemand::at_least(1),
            height: RowDemand::exact(1),
        }
    }

    fn draw(&self, mut window: Window, _hints: RenderingHints) {
        let text = match &self.0.last_error_message {
            Some(msg) => msg.clone(),
            None => self.0.selection_summary(),
        };
        Cursor::new(&mut window).write(&text);
    }
}

struct CursorBehaviour<'a>(&'a mut Context);

impl CursorBehaviour<'_> {
    fn step(&mut self, days: i64) -> OperationResult {
        if self.0.move_cursor(days) {
            Ok(())
        } else {
            Err(())
        }
    }
}

impl Navigatable for CursorBehaviour<'_> {
    fn move_down(&mut self) -> OperationResult {
        self.step(7)
    }

    fn move_left(&mut self) -> OperationResult {
        self.step(-1)
    }

    fn move_right(&mut self) -> OperationResult {
        self.step(1)
    }

    fn move_up(&mut self) -> OperationResult {
        self.step(-7)
    }
}
