//! Line-driven interactive session.
//!
//! The session reads one command per line, applies it to the store and
//! writes the resulting view. While a form is open, lines edit the draft
//! instead.

use log::debug;
use std::io::{BufRead, Write};

use crate::draft::{Field, Form};
use crate::error::RecipeError;
use crate::model::RecipeId;
use crate::storage::SlotStorage;
use crate::store::RecipeStore;
use crate::view;

const HELP: &str = "\
Commands:
  list                 show the recipe list and the selected recipe
  show                 show the selected recipe
  select <id>          select a recipe
  add                  open the form for a new recipe
  edit                 open the form for the selected recipe
  delete               delete the selected recipe
  help                 show this message
  quit                 leave
Form commands:
  name <text>          set the recipe name
  ingredients <text>   set ingredients, items separated by `*`
  description <text>   set directions, steps separated by `*`
  save                 save the recipe
  cancel               discard the draft
";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Quit,
}

pub struct Session<'a, S> {
    store: &'a mut RecipeStore<S>,
    form: Option<Form>,
}

impl<'a, S: SlotStorage> Session<'a, S> {
    pub fn new(store: &'a mut RecipeStore<S>) -> Self {
        Self { store, form: None }
    }

    pub fn form(&self) -> Option<&Form> {
        self.form.as_ref()
    }

    /// Run until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        input: R,
        mut output: W,
    ) -> Result<(), RecipeError> {
        self.flush_notices(&mut output)?;
        write!(
            output,
            "{}",
            view::render_screen(self.store.list(), self.store.selected())
        )?;

        for line in input.lines() {
            let line = line?;
            let step = self.handle(line.trim(), &mut output)?;
            self.flush_notices(&mut output)?;
            output.flush()?;
            if step == Step::Quit {
                break;
            }
        }
        Ok(())
    }

    /// Apply a single command line.
    pub fn handle<W: Write>(&mut self, line: &str, out: &mut W) -> Result<Step, RecipeError> {
        if line.is_empty() {
            return Ok(Step::Continue);
        }
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };
        debug!("Shell command '{}'", command);

        if self.form.is_some() {
            self.handle_form(command, rest, out)
        } else {
            self.handle_browse(command, rest, out)
        }
    }

    fn handle_browse<W: Write>(
        &mut self,
        command: &str,
        rest: &str,
        out: &mut W,
    ) -> Result<Step, RecipeError> {
        match command {
            "list" | "ls" => write!(
                out,
                "{}",
                view::render_screen(self.store.list(), self.store.selected())
            )?,
            "show" => write!(
                out,
                "{}",
                view::render_detail(self.store.selected(), !self.store.is_empty())
            )?,
            "select" => match rest.parse::<RecipeId>() {
                Ok(id) if self.store.select(id) => write!(
                    out,
                    "{}",
                    view::render_detail(self.store.selected(), true)
                )?,
                Ok(id) => writeln!(out, "No recipe with id {}", id)?,
                Err(_) => writeln!(out, "Usage: select <id>")?,
            },
            "add" => self.open_form(Form::create(), out)?,
            "edit" => match self.store.selected() {
                Some(recipe) => {
                    let form = Form::edit(recipe);
                    self.open_form(form, out)?;
                }
                None => writeln!(out, "No recipe selected")?,
            },
            "delete" => match self.store.selected_id() {
                Some(id) => {
                    self.store.delete(id);
                    write!(
                        out,
                        "{}",
                        view::render_screen(self.store.list(), self.store.selected())
                    )?;
                }
                None => writeln!(out, "No recipe selected")?,
            },
            "help" => write!(out, "{}", HELP)?,
            "quit" | "exit" => return Ok(Step::Quit),
            other => writeln!(out, "Unknown command '{}'; type `help`", other)?,
        }
        Ok(Step::Continue)
    }

    fn handle_form<W: Write>(
        &mut self,
        command: &str,
        rest: &str,
        out: &mut W,
    ) -> Result<Step, RecipeError> {
        let Some(form) = self.form.as_mut() else {
            return Ok(Step::Continue);
        };

        if let Some(field) = Field::parse(command) {
            form.set(field, rest);
            return Ok(Step::Continue);
        }

        match command {
            "show" => write!(out, "{}", view::render_form(form))?,
            "save" => {
                if let Some(form) = self.form.take() {
                    match form.submit(&mut *self.store) {
                        Ok(_) => write!(
                            out,
                            "{}",
                            view::render_screen(self.store.list(), self.store.selected())
                        )?,
                        Err((form, rejection)) => {
                            writeln!(out, "{}", rejection)?;
                            self.form = Some(form);
                        }
                    }
                }
            }
            "cancel" => {
                self.form = None;
                writeln!(out, "Discarded draft")?;
            }
            "quit" | "exit" => return Ok(Step::Quit),
            other => writeln!(
                out,
                "Unknown form command '{}'; use name, ingredients, description, save or cancel",
                other
            )?,
        }
        Ok(Step::Continue)
    }

    fn open_form<W: Write>(&mut self, form: Form, out: &mut W) -> Result<(), RecipeError> {
        write!(out, "{}", view::render_form(&form))?;
        self.form = Some(form);
        Ok(())
    }

    fn flush_notices<W: Write>(&mut self, out: &mut W) -> Result<(), RecipeError> {
        for notice in self.store.take_notices() {
            writeln!(out, "! {}", notice)?;
        }
        Ok(())
    }
}
