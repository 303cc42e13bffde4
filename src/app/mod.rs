//! Command handlers for the course client
//!
//! Each handler builds a [`CoursePlayer`] for the logged-in learner, applies
//! one interaction and then waits for the queued backend writes to drain
//! before the process exits.

pub mod account;
pub mod command;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};
use tokio::task::JoinHandle;

use crate::admin::{self, DashboardSummary, SortKey};
use crate::backend::models::{
    AdminSignupRequest, ChangePasswordRequest, ForgotPasswordRequest, LoginRequest, SignupRequest,
};
use crate::backend::{BackendClient, BackendError, ProgressSynchronizer, TokenStore};
use crate::config::Config;
use crate::config::session::Session;
use crate::course::content::{CERTIFICATE_SECTION, COURSE_TITLE, FINAL_QUIZ};
use crate::course::{AnswerKey, Catalog, CourseError, CoursePlayer, SectionKind, ccna_catalog, unlock};
use crate::ui;
use command::{AnswerArg, ParseResult, QuizInput};

/// The course client
pub struct App {
    /// Application configuration
    config: Config,

    /// Logged-in learner and their place in the course
    session: Session,

    /// Course layout and answer keys
    catalog: Catalog,

    /// Backend client
    client: BackendClient,
}

/// Attach a hint for errors the learner can act on
fn explain(e: BackendError) -> anyhow::Error {
    if e.requires_reauth() {
        anyhow::Error::new(e).context("Log in again with: ccna-course login <email>")
    } else if e.is_recoverable() {
        anyhow::Error::new(e).context("Backend unavailable, try again later")
    } else {
        e.into()
    }
}

fn active_name(player: &CoursePlayer<'_>) -> Option<String> {
    player.active().map(|s| s.name.clone())
}

impl App {
    /// Create an application instance with the stored session
    pub fn new(config: Config) -> Result<Self> {
        let session = Session::load()?;
        Self::with_session(config, session)
    }

    /// Create an application instance with an explicit session
    pub fn with_session(config: Config, session: Session) -> Result<Self> {
        let client = BackendClient::new(&config.backend_url, config.request_timeout())
            .context("Failed to create backend client")?;
        Ok(Self { config, session, catalog: ccna_catalog(), client })
    }

    fn username(&self) -> Result<String, BackendError> {
        self.session.username.clone().ok_or(BackendError::NotLoggedIn)
    }

    fn certificate(&self) -> String {
        ui::certificate::render(
            self.session.username.as_deref().unwrap_or("-"),
            self.session.final_score,
            ui::certificate::completion_date(),
        )
    }

    /// Build a player for the logged-in learner and hydrate it
    async fn start_player(&self) -> Result<(CoursePlayer<'_>, JoinHandle<()>)> {
        let username = self.username().map_err(explain)?;
        let token = match TokenStore::get_token(&username) {
            Ok(token) => Some(token),
            Err(e) => {
                tracing::debug!("No access token available: {}", e);
                None
            }
        };

        let (sync, handle) = ProgressSynchronizer::spawn(self.client.clone(), username.clone(), token);
        let mut player = CoursePlayer::new(&self.catalog, sync);
        player.hydrate(self.client.fetch_progress(&username).await);

        let restored = self.session.active_section.as_deref().and_then(|name| player.open(name).ok());
        if restored.is_none() {
            player.resume();
        }

        Ok((player, handle))
    }

    /// Wait for queued writes and remember the open section
    async fn finish(&mut self, active: Option<String>, handle: JoinHandle<()>) -> Result<()> {
        if let Err(e) = handle.await {
            tracing::error!("Progress synchronizer failed: {}", e);
        }
        self.session.active_section = active;
        self.session.save()
    }

    /// Show the course sidebar
    pub async fn status(&mut self) -> Result<()> {
        let username = self.username().map_err(explain)?;
        let (player, handle) = self.start_player().await?;

        let rows = player.sidebar();
        let active = active_name(&player);
        println!(
            "{}",
            ui::curriculum::render(&self.catalog, &rows, active.as_deref(), &username, player.progress())
        );
        println!(
            "{} of {} sections completed",
            player.store().completed_count(&self.catalog),
            self.catalog.total_sections()
        );
        if let Some(locked) = unlock::first_locked(&self.catalog, player.store()) {
            println!("Next to unlock: {}", locked.name);
        }

        drop(player);
        self.finish(active, handle).await
    }

    /// Open a section
    pub async fn open(&mut self, name: &str) -> Result<()> {
        let (mut player, handle) = self.start_player().await?;

        let result = player.open(name).map(|section| {
            println!("{} ({})", section.name, section.module);
            match section.kind {
                SectionKind::Quiz => {
                    println!("Take it with: ccna-course quiz \"{}\"", section.name)
                }
                SectionKind::Certificate => {
                    println!("\n{}", self.certificate());
                    println!("Finish the course with: ccna-course complete");
                }
                SectionKind::Lesson => println!("Mark it done with: ccna-course complete"),
            }
        });

        let active = active_name(&player);
        drop(player);
        self.finish(active, handle).await?;
        Ok(result?)
    }

    /// Complete a section (the open one when `name` is None)
    pub async fn complete(&mut self, name: Option<&str>) -> Result<()> {
        let (mut player, handle) = self.start_player().await?;

        let target = name.map(str::to_string).or_else(|| active_name(&player));
        let result = match name {
            Some(name) => player.complete(name),
            None => player.complete_active(),
        };
        let result = result.map(|done| {
            if target.as_deref() == Some(CERTIFICATE_SECTION) {
                println!("{}", self.certificate());
                println!("Congratulations on completing the {}!", COURSE_TITLE);
            }
            println!("Progress: {}", ui::progress_bar(done.progress, 30));
            if let Some(next) = done.next {
                println!("Next: {}", next.name);
            }
        });

        let active = active_name(&player);
        drop(player);
        self.finish(active, handle).await?;
        Ok(result?)
    }

    /// Take a quiz, either from `--answer` arguments or interactively
    pub async fn quiz(&mut self, name: &str, answers: &[AnswerArg]) -> Result<()> {
        let (mut player, handle) = self.start_player().await?;

        let result = self.run_quiz(&mut player, name, answers).await;
        let final_score = player.outcome(FINAL_QUIZ).filter(|o| o.passed).map(|o| o.score);

        let active = active_name(&player);
        drop(player);
        if final_score.is_some() {
            self.session.final_score = final_score;
        }
        self.finish(active, handle).await?;
        result
    }

    async fn run_quiz(
        &self,
        player: &mut CoursePlayer<'_>,
        name: &str,
        answers: &[AnswerArg],
    ) -> Result<()> {
        player.open(name)?;
        let key = self.catalog.quiz(name).ok_or_else(|| CourseError::NotAQuiz(name.to_string()))?;

        if !answers.is_empty() {
            for arg in answers {
                let id = arg
                    .resolve(key)
                    .with_context(|| format!("No question {} in {}", arg.question, name))?;
                player.answer(name, &id, arg.option)?;
            }
            let outcome = player.submit_quiz(name)?;
            println!("{}", ui::quiz_panel::render_outcome(key, &outcome));
            if outcome.passed {
                self.finish_quiz(player, name)?;
            }
            return Ok(());
        }

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        self.run_interactive(player, key, &mut lines).await
    }

    /// Prompt for answers, submit, and offer a retake after a failing attempt
    async fn run_interactive<R: AsyncBufRead + Unpin>(
        &self,
        player: &mut CoursePlayer<'_>,
        key: &AnswerKey,
        lines: &mut Lines<R>,
    ) -> Result<()> {
        let name = key.section.as_str();
        loop {
            if !self.ask_questions(player, key, lines).await? {
                println!("Quiz abandoned.");
                return Ok(());
            }

            let outcome = player.submit_quiz(name)?;
            println!("{}", ui::quiz_panel::render_outcome(key, &outcome));
            if outcome.passed {
                return self.finish_quiz(player, name);
            }

            println!("Retake the quiz? [y/N]");
            let reply = lines.next_line().await?.unwrap_or_default();
            if !command::parse_confirm(&reply) {
                return Ok(());
            }
            player.retake(name)?;
        }
    }

    /// Prompt for every question; returns false if the learner quit or input ended
    async fn ask_questions<R: AsyncBufRead + Unpin>(
        &self,
        player: &mut CoursePlayer<'_>,
        key: &AnswerKey,
        lines: &mut Lines<R>,
    ) -> Result<bool> {
        let width = self.config.wrap_width;
        println!("{} ({} questions). Type a letter, Enter to skip, :submit or :q", key.section, key.len());

        for (index, question) in key.questions.iter().enumerate() {
            println!("\n{}", ui::quiz_panel::render_question(key, index, width));
            loop {
                let Some(line) = lines.next_line().await? else {
                    return Ok(false);
                };
                match command::parse_quiz_input(&line) {
                    ParseResult::Ok(QuizInput::Answer(option)) => {
                        let correct = player.answer(&key.section, &question.id, option)?;
                        println!("{}", if correct { "Correct!" } else { "Wrong Answer" });
                        break;
                    }
                    ParseResult::Ok(QuizInput::Skip) => break,
                    ParseResult::Ok(QuizInput::Submit) => return Ok(true),
                    ParseResult::Ok(QuizInput::Quit) => return Ok(false),
                    ParseResult::Invalid(input) => println!("Not an option: {}", input),
                }
            }
        }

        Ok(true)
    }

    /// Show the review of a passed quiz and complete its section
    fn finish_quiz(&self, player: &mut CoursePlayer<'_>, name: &str) -> Result<()> {
        let review = player.review(name)?;
        println!("{}", ui::quiz_panel::render_review(&review, self.config.wrap_width));

        let done = player.complete(name)?;
        println!("Progress: {}", ui::progress_bar(done.progress, 30));
        match done.next {
            Some(next) if next.kind == SectionKind::Certificate => {
                println!("Course complete. View your certificate with: ccna-course open \"{}\"", next.name)
            }
            Some(next) => println!("Next: {}", next.name),
            None => {}
        }
        Ok(())
    }

    /// Log in and remember the learner
    pub async fn login(&mut self, email: &str, password: &str) -> Result<()> {
        account::check_email(email)?;
        let request = LoginRequest { email: email.to_string(), password: password.to_string() };
        let response = self.client.login(&request).await.map_err(explain)?;

        let username = response.username.unwrap_or_else(|| email.to_string());
        match &response.token {
            Some(token) => {
                match TokenStore::set_token(&username, token) {
                    Ok(()) => tracing::debug!("Stored access token {}", TokenStore::mask_token(token)),
                    Err(e) => tracing::warn!("Could not store access token: {}", e),
                }
            }
            None => tracing::warn!("Backend returned no access token; final quiz scores cannot be saved"),
        }

        let final_score = self
            .session
            .final_score
            .filter(|_| self.session.username.as_deref() == Some(username.as_str()));
        self.session = Session {
            username: Some(username.clone()),
            role: response.role,
            active_section: None,
            final_score,
        };
        self.session.save()?;
        println!("Welcome back, {}!", username);
        Ok(())
    }

    /// Forget the learner and their token
    pub fn logout(&mut self) -> Result<()> {
        if let Some(username) = &self.session.username {
            if let Err(e) = TokenStore::delete_token(username) {
                tracing::warn!("Could not delete access token: {}", e);
            }
        }
        self.session.clear();
        self.session.save()?;
        println!("Logged out.");
        Ok(())
    }

    /// Register a learner account
    pub async fn signup(&self, username: &str, email: &str, password: &str, confirm: &str) -> Result<()> {
        account::confirm_password(password, confirm)?;
        account::check_email(email)?;
        let request = SignupRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        println!("{}", self.client.signup(&request).await.map_err(explain)?);
        Ok(())
    }

    /// Register an admin account
    pub async fn admin_signup(&self, name: &str, email: &str, password: &str, confirm: &str) -> Result<()> {
        account::confirm_password(password, confirm)?;
        account::check_email(email)?;
        let request = AdminSignupRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            role: "admin".to_string(),
        };
        println!("{}", self.client.admin_signup(&request).await.map_err(explain)?);
        Ok(())
    }

    /// Start a password reset
    pub async fn forgot_password(&self, email: &str) -> Result<()> {
        account::check_email(email)?;
        let request = ForgotPasswordRequest { email: email.to_string() };
        println!("{}", self.client.forgot_password(&request).await.map_err(explain)?);
        Ok(())
    }

    /// Set a new password
    pub async fn change_password(&self, email: &str, password: &str, confirm: &str) -> Result<()> {
        account::check_email(email)?;
        account::check_new_password(password, confirm)?;
        let request =
            ChangePasswordRequest { email: email.to_string(), new_password: password.to_string() };
        println!("{}", self.client.change_password(&request).await.map_err(explain)?);
        Ok(())
    }

    fn warn_if_not_admin(&self) {
        if !self.session.is_admin() {
            tracing::warn!("Logged-in account is not an admin; the backend may refuse");
        }
    }

    /// Print dashboard headline numbers
    pub async fn admin_summary(&self) -> Result<()> {
        self.warn_if_not_admin();
        let learners = self.client.fetch_all_learners().await.map_err(explain)?;
        print!("{}", ui::dashboard::render_summary(&DashboardSummary::from_learners(&learners)));
        Ok(())
    }

    /// Print the learner table
    pub async fn admin_users(&self, search: Option<&str>, sort: Option<SortKey>, descending: bool) -> Result<()> {
        self.warn_if_not_admin();
        let learners = self.client.fetch_all_learners().await.map_err(explain)?;
        let mut rows = admin::search(&learners, search.unwrap_or_default());
        if let Some(key) = sort {
            admin::sort(&mut rows, key, descending);
        }
        print!("{}", ui::dashboard::render_table(&rows));
        Ok(())
    }

    /// Print one learner's detail
    pub async fn admin_user(&self, email: &str) -> Result<()> {
        self.warn_if_not_admin();
        let learner = self.client.fetch_learner(email).await.map_err(explain)?;
        print!("{}", ui::dashboard::render_detail(&learner));
        Ok(())
    }
}
