//! Application root: the store, the orchestrators and every screen
//! view-model behind one handle.
//!
//! Every operation reads `now` from the injected [`Clock`], and every phase
//! change it causes is queued until the next [`BookingApp::tick`].

use std::sync::Arc;

use chrono::NaiveDate;
use shared::{
    domain::{FlightId, ShareUser},
    fixtures,
};
use tracing::{info, warn};

use crate::{
    clock::Clock,
    config::{Settings, Timings},
    error::CoreError,
    frame::Frame,
    orchestrator::{NavigationOutcome, ScreenOrchestrator},
    routes::{BookingStep, Location},
    screens::{
        boarding_pass::{self, BoardingPassView},
        details::{DetailsEdit, DetailsForm},
        flights::{self, FlightLeg, FlightsFrame, FlightsScreen, FlightsView},
        landing::{self, LandingView},
        passengers::{self, PassengersScreen},
        payment::{PaymentFlow, PaymentFrame, PaymentProcessor, PaymentReceipt, PaymentRequest},
        search::{self, SearchDetailsView},
        summary::{self, SummaryCard, SummaryFrame, SummaryView},
        ItemLayer,
    },
    scroll::handle_scroll,
    store::{Action, AppState, Store},
    transition::{NoReflow, PhaseChange, Reflow},
};

pub struct BookingApp<C: Clock> {
    settings: Settings,
    timings: Timings,
    clock: C,
    store: Store,
    orchestrator: ScreenOrchestrator,
    contacts: Vec<ShareUser>,
    details: DetailsForm,
    flights: FlightsScreen,
    passengers: PassengersScreen,
    payment: PaymentFlow,
    summary: SummaryCard,
    reflow: Box<dyn Reflow + Send>,
    pending: Vec<PhaseChange>,
    redirects: Vec<NavigationOutcome>,
}

impl<C: Clock> BookingApp<C> {
    pub fn new(settings: Settings, clock: C) -> Self {
        Self::with_reflow(settings, clock, NoReflow)
    }

    pub fn with_reflow(settings: Settings, clock: C, reflow: impl Reflow + Send + 'static) -> Self {
        let mut reflow: Box<dyn Reflow + Send> = Box::new(reflow);
        let timings = settings.timings();
        let now = clock.now();
        let store = Store::new(AppState::initial(settings.theme));
        let mut orchestrator = ScreenOrchestrator::new(&timings);
        let pending = orchestrator.mount(store.get(), now, reflow.as_mut());
        let payment = PaymentFlow::new(&timings, now, reflow.as_mut());
        Self {
            details: DetailsForm::new(settings.max_passengers),
            flights: FlightsScreen::new(&timings),
            passengers: PassengersScreen::new(&timings),
            summary: SummaryCard::new(&timings),
            contacts: fixtures::share_users(),
            settings,
            timings,
            clock,
            store,
            orchestrator,
            payment,
            reflow,
            pending,
            redirects: Vec::new(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn state(&self) -> Arc<AppState> {
        self.store.state()
    }

    pub fn location(&self) -> &Location {
        self.orchestrator.location()
    }

    pub fn orchestrator(&self) -> &ScreenOrchestrator {
        &self.orchestrator
    }

    pub fn current_step(&self) -> Option<BookingStep> {
        self.location().booking_step().map(|matched| matched.target)
    }

    pub fn is_settled(&self) -> bool {
        self.orchestrator.is_settled()
            && self.flights.is_settled()
            && self.passengers.is_settled()
            && self.payment.is_settled()
            && self.summary.is_settled()
    }

    pub fn navigate(&mut self, path: &str) -> Result<NavigationOutcome, CoreError> {
        let now = self.clock.now();
        let previous = self.location().clone();
        let outcome = self
            .orchestrator
            .navigate(path, self.store.get(), now, self.reflow.as_mut())?;
        self.after_navigation(&previous);
        Ok(outcome)
    }

    pub fn back(&mut self) -> Option<NavigationOutcome> {
        let now = self.clock.now();
        let previous = self.location().clone();
        let outcome = self
            .orchestrator
            .back(self.store.get(), now, self.reflow.as_mut())?;
        self.after_navigation(&previous);
        Some(outcome)
    }

    pub fn dispatch(&mut self, action: Action) -> bool {
        let changed = self.store.dispatch(action);
        if changed {
            self.sync_views();
        }
        changed
    }

    pub fn dispatch_json(&mut self, raw: &str) -> Result<bool, CoreError> {
        let action = Action::from_json(raw)?;
        Ok(self.dispatch(action))
    }

    /// Fires due deadlines everywhere and returns every phase change since
    /// the previous tick, including those caused by other operations.
    pub fn tick(&mut self) -> Vec<PhaseChange> {
        let now = self.clock.now();
        let mut changes = std::mem::take(&mut self.pending);
        changes.extend(self.orchestrator.tick(&mut self.store, now));
        changes.extend(self.flights.poll(now));
        changes.extend(self.passengers.poll(now));
        changes.extend(self.payment.poll(now));
        changes.extend(self.summary.poll(now));
        changes
    }

    /// Redirects forced by store changes since the previous call, e.g. the
    /// boarding pass losing its departure flight.
    pub fn take_redirects(&mut self) -> Vec<NavigationOutcome> {
        std::mem::take(&mut self.redirects)
    }

    pub fn frame(&self) -> Frame {
        self.orchestrator.frame(self.store.get(), self.clock.now())
    }

    pub fn scroll(&mut self, scroll_top: f32) -> bool {
        handle_scroll(&mut self.store, scroll_top, self.timings.scroll_threshold_px)
    }

    pub fn toggle_menu(&mut self) -> bool {
        let open = !self.store.get().menu_open;
        self.dispatch(Action::SetMenuOpen(open))
    }

    pub fn toggle_theme(&mut self) -> bool {
        self.dispatch(Action::ToggleTheme(None))
    }

    pub fn details_form(&self) -> &DetailsForm {
        &self.details
    }

    pub fn edit_details(&mut self, edit: DetailsEdit) -> bool {
        let changed = self.details.edit(&mut self.store, edit);
        self.sync_views();
        changed
    }

    pub fn set_departure_date(&mut self, date: NaiveDate) -> bool {
        let changed = self.details.set_departure_date(&mut self.store, date);
        self.sync_views();
        changed
    }

    pub fn set_return_date(&mut self, date: NaiveDate) -> bool {
        let changed = self.details.set_return_date(&mut self.store, date);
        self.sync_views();
        changed
    }

    /// Runs the details gate. On success navigates to the flights step and
    /// then replaces the passenger stubs, in that order.
    pub fn submit_details(&mut self) -> Result<NavigationOutcome, CoreError> {
        let submission = self.details.submit(&self.store)?;
        let outcome = self.navigate(submission.route)?;
        self.dispatch(Action::SetPassengerData(submission.passenger_data));
        Ok(outcome)
    }

    pub fn flights_view(&self) -> FlightsView {
        flights::flights_view(self.store.get())
    }

    pub fn flights_frame(&self) -> FlightsFrame {
        self.flights.frame(self.clock.now())
    }

    /// Toggles a flight by id. `None` when the id is not listed for the leg.
    pub fn select_flight(&mut self, leg: FlightLeg, id: &FlightId) -> Option<bool> {
        let changed = flights::select_flight_by_id(&mut self.store, leg, id)?;
        self.sync_views();
        Some(changed)
    }

    pub fn continue_from_flights(&mut self) -> Result<NavigationOutcome, CoreError> {
        let state = self.store.state();
        if !flights::can_continue(&state) {
            return Err(CoreError::SelectionIncomplete);
        }
        self.navigate(flights::next_route(&state.booking_details))
    }

    pub fn add_passenger(&mut self) -> bool {
        let changed = passengers::add_passenger(&mut self.store, self.settings.max_passengers);
        self.sync_views();
        changed
    }

    pub fn remove_passenger(&mut self, index: usize) -> bool {
        let changed = passengers::remove_passenger(&mut self.store, index);
        self.sync_views();
        changed
    }

    pub fn set_passenger_email(&mut self, index: usize, email: &str) -> bool {
        let changed = passengers::set_passenger_email(&mut self.store, index, email);
        self.sync_views();
        changed
    }

    pub fn available_users(&self) -> Vec<ShareUser> {
        passengers::available_users(self.store.get(), &self.contacts)
    }

    pub fn passenger_rows(&self) -> Vec<ItemLayer> {
        self.passengers.frame(self.clock.now())
    }

    pub fn continue_from_passengers(&mut self) -> Result<NavigationOutcome, CoreError> {
        self.navigate(passengers::submit_route())
    }

    pub fn payment(&self) -> &PaymentFlow {
        &self.payment
    }

    pub fn payment_frame(&self) -> PaymentFrame {
        self.payment.frame(self.clock.now())
    }

    pub fn begin_payment(&mut self) -> Result<PaymentRequest, CoreError> {
        self.payment.begin(self.store.get())
    }

    pub fn finish_payment(&mut self, receipt: &PaymentReceipt) {
        let now = self.clock.now();
        let changes = self.payment.complete(receipt, now, self.reflow.as_mut());
        self.pending.extend(changes);
    }

    pub fn cancel_payment(&mut self) {
        self.payment.cancel();
    }

    /// Runs a whole payment through `processor`.
    pub async fn pay(&mut self, processor: &dyn PaymentProcessor) -> anyhow::Result<PaymentReceipt> {
        let request = self.begin_payment()?;
        match processor.process(request).await {
            Ok(receipt) => {
                self.finish_payment(&receipt);
                Ok(receipt)
            }
            Err(err) => {
                warn!(error = %err, "payment failed");
                self.cancel_payment();
                Err(err)
            }
        }
    }

    pub fn summary(&self) -> Option<SummaryView> {
        summary::summary_view(self.store.get())
    }

    pub fn summary_frame(&self) -> SummaryFrame {
        self.summary.frame(self.clock.now())
    }

    pub fn toggle_summary(&mut self) {
        let now = self.clock.now();
        let change = self.summary.toggle(now, self.reflow.as_mut());
        self.pending.extend(change);
    }

    pub fn measure_summary(&mut self, height: f32) {
        self.summary.measure(height);
    }

    pub fn position_summary(&mut self, offset: f32) -> bool {
        self.summary.position(offset)
    }

    pub fn landing_view(&self) -> LandingView {
        landing::landing_view(self.store.get())
    }

    pub fn search_details_view(&self) -> SearchDetailsView {
        search::search_details_view(self.store.get())
    }

    pub fn boarding_pass_view(&self) -> Option<BoardingPassView> {
        boarding_pass::boarding_pass_view(self.store.get(), &self.contacts)
    }

    /// Fresh per-step state whenever a step is entered from elsewhere.
    fn after_navigation(&mut self, previous: &Location) {
        let now = self.clock.now();
        let current = self.current_step();
        let entered = |step| current == Some(step) && previous.path() != step.path();
        if entered(BookingStep::Flights) {
            self.flights = FlightsScreen::new(&self.timings);
        }
        if entered(BookingStep::Passengers) {
            self.passengers = PassengersScreen::new(&self.timings);
        }
        if entered(BookingStep::Payment) && !self.payment.is_loading() {
            self.payment = PaymentFlow::new(&self.timings, now, self.reflow.as_mut());
        }
        if current.is_none() && self.summary.is_expanded() {
            let change = self.summary.set_expanded(false, now, self.reflow.as_mut());
            self.pending.extend(change);
        }
        info!(from = %previous, to = %self.location(), "location changed");
        self.sync_views();
    }

    /// Re-targets state-driven primitives after the store changed.
    fn sync_views(&mut self) {
        let now = self.clock.now();
        let state = self.store.state();
        let step = self.current_step();
        let changes = self
            .orchestrator
            .sync_state(&state, now, self.reflow.as_mut());
        self.pending.extend(changes);
        if let Some(outcome) = self.orchestrator.take_redirect() {
            let previous = outcome.requested().clone();
            warn!(from = %previous, "current screen lost its state, redirected");
            self.redirects.push(outcome);
            self.after_navigation(&previous);
            return;
        }
        let reflow = self.reflow.as_mut();
        match step {
            Some(BookingStep::Flights) => {
                self.pending.extend(self.flights.sync(&state, now, &mut *reflow));
            }
            Some(BookingStep::Passengers) => {
                self.pending.extend(self.passengers.sync(&state, now, &mut *reflow));
            }
            _ => {}
        }
    }
}

#[cfg(test)]
#[path = "tests/app_tests.rs"]
mod tests;
