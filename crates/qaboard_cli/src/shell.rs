//! Line-oriented menu shell over `BoardGateway`.
//!
//! Parses user choices, turns display indexes into persistent ids and
//! renders whatever the gateway returns. End of input quits cleanly from any
//! prompt.

use qaboard_core::{
    Answer, AnswerScope, BoardGateway, ManagementList, PersistentId, Question, QuestionId,
};
use std::io::{self, BufRead, Write};

const USERS: [&str; 3] = ["Student A", "Student B", "Student C"];

pub struct Shell<R, W> {
    gateway: BoardGateway,
    input: R,
    output: W,
    current_user: String,
    at_eof: bool,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(gateway: BoardGateway, input: R, output: W) -> Self {
        Self {
            gateway,
            input,
            output,
            current_user: String::new(),
            at_eof: false,
        }
    }

    pub fn into_gateway(self) -> BoardGateway {
        self.gateway
    }

    /// Signs a user in, then loops the main menu until quit or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        if !self.sign_in()? {
            return Ok(());
        }

        loop {
            writeln!(self.output, "Select an option to proceed.")?;
            writeln!(self.output, "[1] Post new question")?;
            writeln!(self.output, "[2] View all questions")?;
            writeln!(self.output, "[3] Manage my questions")?;
            writeln!(self.output, "[4] Manage my answers")?;
            writeln!(self.output, "[5] Quit")?;
            let keep_going = match self.read_choice()? {
                None | Some(5) => false,
                Some(1) => self.post_question()?,
                Some(2) => self.browse_questions()?,
                Some(3) => self.manage_questions()?,
                Some(4) => self.manage_answers()?,
                Some(_) => {
                    writeln!(self.output, "Invalid selection. Please try again.")?;
                    true
                }
            };
            if !keep_going {
                writeln!(self.output, "Goodbye.")?;
                return Ok(());
            }
        }
    }

    fn sign_in(&mut self) -> io::Result<bool> {
        loop {
            writeln!(self.output, "Select a user to sign in as:")?;
            for (position, user) in USERS.iter().enumerate() {
                writeln!(self.output, "[{}] {user}", position + 1)?;
            }
            let Some(choice) = self.read_choice()? else {
                return Ok(false);
            };
            let user = usize::try_from(choice)
                .ok()
                .and_then(|index| index.checked_sub(1))
                .and_then(|index| USERS.get(index));
            match user {
                Some(user) => {
                    self.current_user = (*user).to_string();
                    writeln!(self.output, "You are now signed in as {user}.")?;
                    return Ok(true);
                }
                None => writeln!(self.output, "Invalid selection. Please try again.")?,
            }
        }
    }

    fn post_question(&mut self) -> io::Result<bool> {
        let Some(title) = self.read_text("Title:")? else {
            return Ok(false);
        };
        let Some(text) = self.read_text("Body:")? else {
            return Ok(false);
        };
        let question = Question::new(title, text, self.current_user.as_str());
        match self.gateway.post_question(&question) {
            Ok(_) => writeln!(self.output, "Question successfully posted!")?,
            Err(err) => writeln!(self.output, "Question failed to post ({err}). Please try again.")?,
        }
        Ok(true)
    }

    fn browse_questions(&mut self) -> io::Result<bool> {
        let mut questions = match self.gateway.list_all_questions() {
            Ok(list) => list,
            Err(err) => {
                writeln!(self.output, "Could not load questions: {err}")?;
                return Ok(true);
            }
        };
        questions.render(&mut self.output)?;

        writeln!(self.output, "[1] Post an answer to a question")?;
        writeln!(self.output, "[2] View the answers to a question")?;
        writeln!(self.output, "[3] Search for questions")?;
        writeln!(self.output, "[4] Return to the main menu")?;
        match self.read_choice()? {
            None => Ok(false),
            Some(1) => self.post_answer(),
            Some(2) => self.view_answers(),
            Some(3) => {
                let Some(term) = self.read_text("Enter search term:")? else {
                    return Ok(false);
                };
                questions.filter(&term);
                writeln!(self.output, "Below are the results of your search.")?;
                questions.render(&mut self.output)?;
                Ok(true)
            }
            Some(_) => Ok(true),
        }
    }

    fn post_answer(&mut self) -> io::Result<bool> {
        writeln!(self.output, "Enter the # of the question you want to answer:")?;
        let Some(question_id) = self.read_choice()? else {
            return Ok(false);
        };
        let Some(text) = self.read_text("Enter answer text:")? else {
            return Ok(false);
        };
        let answer = Answer::new(text, self.current_user.as_str(), question_id);
        match self.gateway.post_answer(&answer) {
            Ok(_) => writeln!(self.output, "Answer successfully posted!")?,
            Err(err) => writeln!(self.output, "Answer failed to post ({err}). Please try again.")?,
        }
        Ok(true)
    }

    fn view_answers(&mut self) -> io::Result<bool> {
        writeln!(self.output, "Enter the # of the question whose answers you want to see:")?;
        let Some(question_id) = self.read_choice()? else {
            return Ok(false);
        };
        match self.gateway.view_answers_to_question(question_id) {
            Ok(answers) => {
                writeln!(
                    self.output,
                    "Answers to question {question_id}. Look out for the answer(s) marked \"(Solution)\"."
                )?;
                answers.render(&mut self.output)?;
            }
            Err(err) => writeln!(self.output, "Could not load answers: {err}")?,
        }
        Ok(true)
    }

    fn manage_questions(&mut self) -> io::Result<bool> {
        writeln!(self.output, "[1] Edit a question")?;
        writeln!(self.output, "[2] Mark a question as resolved")?;
        writeln!(self.output, "[3] Delete a question")?;
        writeln!(self.output, "[4] Return to the main menu")?;
        let action = match self.read_choice()? {
            None => return Ok(false),
            Some(action @ 1..=3) => action,
            Some(_) => return Ok(true),
        };

        let questions = match self.gateway.show_questions_to_manage(&self.current_user) {
            Ok(list) => list,
            Err(err) => {
                writeln!(self.output, "Could not load your questions: {err}")?;
                return Ok(true);
            }
        };
        let Some(picked) = self.pick(&questions, "question")? else {
            return Ok(!self.at_eof);
        };

        match action {
            1 => self.edit_question(picked),
            2 => self.resolve_question(picked),
            _ => self.delete_question(picked),
        }
    }

    fn edit_question(&mut self, question_id: QuestionId) -> io::Result<bool> {
        let Some(title) = self.read_text("Enter updated question title:")? else {
            return Ok(false);
        };
        let Some(text) = self.read_text("Enter updated question text:")? else {
            return Ok(false);
        };
        match self.gateway.update_question(question_id, &title, &text) {
            Ok(()) => {
                let position = self
                    .gateway
                    .show_questions_to_manage(&self.current_user)
                    .ok()
                    .and_then(|list| list.display_index_of(question_id));
                self.report_edit("Question", position)?;
            }
            Err(err) => writeln!(self.output, "Question was not edited: {err}")?,
        }
        Ok(true)
    }

    fn resolve_question(&mut self, question_id: QuestionId) -> io::Result<bool> {
        let answers = match self
            .gateway
            .show_answers_to_manage(&AnswerScope::UnderQuestion(question_id))
        {
            Ok(list) => list,
            Err(err) => {
                writeln!(self.output, "Could not load answers: {err}")?;
                return Ok(true);
            }
        };
        let Some(answer_id) = self.pick(&answers, "answer to mark as solution")? else {
            return Ok(!self.at_eof);
        };
        match self.gateway.accept_solution(question_id, answer_id) {
            Ok(()) => writeln!(
                self.output,
                "Answer marked as solution. Your question is now marked as resolved."
            )?,
            Err(err) => writeln!(self.output, "Question was not resolved: {err}")?,
        }
        Ok(true)
    }

    fn delete_question(&mut self, question_id: QuestionId) -> io::Result<bool> {
        match self.confirm()? {
            None => Ok(false),
            Some(false) => {
                writeln!(self.output, "Your question has not been deleted.")?;
                Ok(true)
            }
            Some(true) => {
                match self.gateway.delete_question(question_id) {
                    Ok(()) => writeln!(self.output, "Question successfully deleted.")?,
                    Err(err) => writeln!(self.output, "Question was not deleted: {err}")?,
                }
                Ok(true)
            }
        }
    }

    fn manage_answers(&mut self) -> io::Result<bool> {
        writeln!(self.output, "[1] Update an answer")?;
        writeln!(self.output, "[2] Delete an answer")?;
        writeln!(self.output, "[3] Return to the main menu")?;
        let action = match self.read_choice()? {
            None => return Ok(false),
            Some(action @ 1..=2) => action,
            Some(_) => return Ok(true),
        };

        let scope = AnswerScope::PostedBy(self.current_user.clone());
        let answers = match self.gateway.show_answers_to_manage(&scope) {
            Ok(list) => list,
            Err(err) => {
                writeln!(self.output, "Could not load your answers: {err}")?;
                return Ok(true);
            }
        };
        let Some(answer_id) = self.pick(&answers, "answer")? else {
            return Ok(!self.at_eof);
        };

        if action == 1 {
            let Some(text) = self.read_text("Enter updated answer text:")? else {
                return Ok(false);
            };
            match self.gateway.update_answer(answer_id, &text) {
                Ok(()) => {
                    let position = self
                        .gateway
                        .show_answers_to_manage(&scope)
                        .ok()
                        .and_then(|list| list.display_index_of(answer_id));
                    self.report_edit("Answer", position)?;
                }
                Err(err) => writeln!(self.output, "Answer was not updated: {err}")?,
            }
            return Ok(true);
        }

        match self.confirm()? {
            None => return Ok(false),
            Some(false) => writeln!(self.output, "Your answer has not been deleted.")?,
            Some(true) => match self.gateway.delete_answer(answer_id) {
                Ok(()) => writeln!(self.output, "Answer successfully deleted.")?,
                Err(err) => writeln!(self.output, "Answer was not deleted: {err}")?,
            },
        }
        Ok(true)
    }

    /// Renders `list` and resolves the chosen display index.
    ///
    /// Returns `None` for an empty list, a bad index or end of input; the
    /// latter also sets `at_eof`.
    fn pick(&mut self, list: &ManagementList, noun: &str) -> io::Result<Option<PersistentId>> {
        if list.is_empty() {
            writeln!(self.output, "There is nothing to choose from.")?;
            return Ok(None);
        }
        list.render(&mut self.output)?;
        writeln!(self.output, "Enter the # of the {noun}:")?;
        let Some(index) = self.read_choice()? else {
            return Ok(None);
        };
        match list.resolve_id(index) {
            Ok(id) => Ok(Some(id)),
            Err(err) => {
                writeln!(self.output, "{err}")?;
                Ok(None)
            }
        }
    }

    /// Tells the user where the edited entry now sits in their list.
    fn report_edit(&mut self, noun: &str, position: Option<usize>) -> io::Result<()> {
        match position {
            Some(index) => writeln!(self.output, "{noun} #{index} successfully updated."),
            None => writeln!(self.output, "{noun} successfully updated."),
        }
    }

    fn confirm(&mut self) -> io::Result<Option<bool>> {
        writeln!(self.output, "Are you sure?")?;
        writeln!(self.output, "[1] Yes")?;
        writeln!(self.output, "[2] No")?;
        Ok(self.read_choice()?.map(|choice| choice == 1))
    }

    fn read_text(&mut self, prompt: &str) -> io::Result<Option<String>> {
        writeln!(self.output, "{prompt}")?;
        self.read_line()
    }

    /// Reads a number, re-prompting until one parses.
    fn read_choice(&mut self) -> io::Result<Option<i64>> {
        loop {
            writeln!(self.output, "Enter the # corresponding to your choice:")?;
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            match line.trim().parse::<i64>() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => writeln!(self.output, "Please enter a number.")?,
            }
        }
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            self.at_eof = true;
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}
