//! Per-screen rendering. Every function reads view-models from the core and
//! forwards user input back as core operations; nothing here owns booking state.

use chrono::NaiveDate;
use client_core::{
    frame::WizardFrame,
    screens::{
        boarding_pass::{BAGGAGE, DURATION_LABEL},
        details::{location_suggestions, passenger_options, DetailsEdit},
        flights::{self, FlightLeg, DEPARTURE_HEADER, RETURN_HEADER},
        passengers::{passenger_label, EMAIL_PLACEHOLDER, PRIMARY_USER_TAG},
        payment::{self, PaymentStatus},
        ItemLayer,
    },
    transition::TransitionContext,
    BookingApp, BookingStep, CoreError, Location, WallClock,
};
use crossbeam_channel::Sender;
use eframe::egui;
use shared::{
    domain::{BookingField, Flight},
    format::format_money,
};

use crate::{
    backend_bridge::commands::BackendCommand,
    controller::orchestration::dispatch_backend_command,
    ui::{motion, theme::Palette},
};

const DATE_FORMAT: &str = "%Y-%m-%d";
const SEARCH_BANNER_HEIGHT: f32 = 56.0;
const SUMMARY_BAR_HEIGHT: f32 = 72.0;
/// How far the search banner moves up once the step content is scrolled.
const RAISED_LIFT: f32 = 8.0;

/// Text the user is still typing into date fields.
#[derive(Debug, Default)]
pub struct DateInputs {
    pub departure: String,
    pub ret: String,
}

pub struct ScreenCx<'a> {
    pub app: &'a mut BookingApp<WallClock>,
    pub cmd_tx: &'a Sender<BackendCommand>,
    pub status: &'a mut String,
    pub dates: &'a mut DateInputs,
    pub palette: Palette,
}

impl ScreenCx<'_> {
    fn go(&mut self, path: &str) {
        if let Err(err) = self.app.navigate(path) {
            *self.status = err.to_string();
        }
    }
}

/// Runs `add_contents` inside a child ui faded to the layer's visibility.
/// Layers that are not fully entered ignore input.
fn faded<R>(
    ui: &mut egui::Ui,
    rect: egui::Rect,
    context: &TransitionContext,
    add_contents: impl FnOnce(&mut egui::Ui) -> R,
) -> R {
    let mut child = ui.new_child(egui::UiBuilder::new().max_rect(rect));
    child.set_clip_rect(ui.clip_rect().intersect(rect.expand(1.0)));
    child.set_opacity(context.visibility);
    if !context.is_interactive() {
        child.disable();
    }
    add_contents(&mut child)
}

/// Vertical scroll area that reports its offset for scroll restoration.
fn scrolled(ui: &mut egui::Ui, cx: &mut ScreenCx<'_>, id: &str, add_contents: impl FnOnce(&mut egui::Ui, &mut ScreenCx<'_>)) {
    let output = egui::ScrollArea::vertical()
        .id_salt(id)
        .auto_shrink([false, false])
        .show(ui, |ui| add_contents(ui, cx));
    let key = output.id.with("reported-offset");
    let previous = ui.ctx().data(|data| data.get_temp::<f32>(key));
    if let Some(offset) = motion::scroll_report(previous, output.state.offset.y, ui.is_enabled()) {
        ui.ctx().data_mut(|data| data.insert_temp(key, offset));
        cx.app.scroll(offset);
    }
}

fn card<R>(ui: &mut egui::Ui, palette: &Palette, add_contents: impl FnOnce(&mut egui::Ui) -> R) -> R {
    egui::Frame::new()
        .fill(palette.surface)
        .corner_radius(egui::CornerRadius::same(12))
        .inner_margin(egui::Margin::same(12))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            add_contents(ui)
        })
        .inner
}

fn primary_button(ui: &mut egui::Ui, palette: &Palette, label: &str) -> egui::Response {
    ui.add_sized(
        [ui.available_width(), 44.0],
        egui::Button::new(egui::RichText::new(label).strong().color(egui::Color32::WHITE))
            .fill(palette.accent)
            .corner_radius(egui::CornerRadius::same(22)),
    )
}

fn field_error(ui: &mut egui::Ui, cx: &ScreenCx<'_>, field: BookingField) {
    if let Some(message) = cx.app.details_form().errors().message_for(field) {
        ui.label(egui::RichText::new(message).small().color(cx.palette.error));
    }
}

pub fn landing(ui: &mut egui::Ui, cx: &mut ScreenCx<'_>) {
    let view = cx.app.landing_view();
    ui.add_space(ui.available_height() * 0.45);
    for line in &view.greeting {
        ui.label(egui::RichText::new(line).size(28.0).strong());
    }
    ui.add_space(24.0);
    if primary_button(ui, &cx.palette, &view.call_to_action).clicked() {
        cx.go(&view.call_to_action_route);
    }
}

/// The booking container: search banner, the sliding step layers and the
/// summary card.
pub fn booking(ui: &mut egui::Ui, cx: &mut ScreenCx<'_>, wizard: &WizardFrame) {
    let full = ui.max_rect();
    let mut body = full;

    for layer in &wizard.search_details {
        let height = SEARCH_BANNER_HEIGHT;
        let lift = if cx.app.state().scrolled { RAISED_LIFT } else { 0.0 };
        let top = full.min.y - motion::rise_offset(&layer.context, height) - lift;
        let rect = egui::Rect::from_min_size(egui::pos2(full.min.x, top), egui::vec2(full.width(), height));
        faded(ui, rect, &layer.context, |ui| search_banner(ui, cx));
        body.min.y = body.min.y.max(full.min.y + height * layer.context.visibility);
    }

    if wizard.summary.is_some() {
        body.max.y -= SUMMARY_BAR_HEIGHT;
    }

    for layer in &wizard.steps {
        let rect = motion::layer_rect(&layer.context, body);
        faded(ui, rect, &layer.context, |ui| step(ui, cx, layer.step, &layer.key));
    }

    if let Some(layer) = &wizard.summary {
        let rise = motion::rise_offset(&layer.context, SUMMARY_BAR_HEIGHT);
        let rect = egui::Rect::from_min_max(
            egui::pos2(full.min.x, full.max.y - SUMMARY_BAR_HEIGHT + rise),
            egui::pos2(full.max.x, full.max.y + rise),
        );
        faded(ui, rect, &layer.context, |ui| summary_card(ui, cx));
    }
}

fn step(ui: &mut egui::Ui, cx: &mut ScreenCx<'_>, step: BookingStep, key: &str) {
    scrolled(ui, cx, key, |ui, cx| {
        ui.heading(step.title());
        ui.add_space(8.0);
        match step {
            BookingStep::Details => details(ui, cx),
            BookingStep::Flights => flights(ui, cx),
            BookingStep::Passengers => passengers(ui, cx),
            BookingStep::Payment => payment(ui, cx),
        }
        ui.add_space(SUMMARY_BAR_HEIGHT);
    });
}

fn search_banner(ui: &mut egui::Ui, cx: &mut ScreenCx<'_>) {
    let view = cx.app.search_details_view();
    let fill = if view.raised {
        cx.palette.raised_surface
    } else {
        cx.palette.surface
    };
    egui::Frame::new()
        .fill(fill)
        .inner_margin(egui::Margin::symmetric(12, 8))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label(egui::RichText::new(&view.destination).strong());
                    ui.label(egui::RichText::new(&view.options).small().color(cx.palette.text_muted));
                });
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.small_button("Edit").clicked() {
                        cx.app.back();
                    }
                });
            });
        });
}

fn location_field(ui: &mut egui::Ui, cx: &mut ScreenCx<'_>, label: &str, field: BookingField) {
    let details = cx.app.state().booking_details.clone();
    let mut value = match field {
        BookingField::From => details.from,
        _ => details.to,
    };
    ui.label(label);
    let response = ui.add(egui::TextEdit::singleline(&mut value).desired_width(f32::INFINITY));
    let edit = |value: String| match field {
        BookingField::From => DetailsEdit::From(value),
        _ => DetailsEdit::To(value),
    };
    if response.changed() {
        cx.app.edit_details(edit(value.clone()));
    }
    let suggestions = location_suggestions(&value);
    let settled = suggestions.iter().any(|location| location.city == value);
    if !value.is_empty() && !settled {
        for location in suggestions.into_iter().take(3) {
            let text = format!("{} ({})", location.city, location.airport);
            if ui.small_button(text).clicked() {
                cx.app.edit_details(edit(location.city));
            }
        }
    }
    field_error(ui, cx, field);
}

fn date_field(ui: &mut egui::Ui, cx: &mut ScreenCx<'_>, field: BookingField) {
    let (label, current) = match field {
        BookingField::DepartureDate => ("Departure date", cx.app.state().booking_details.departure_date),
        _ => ("Return date", cx.app.state().booking_details.return_date),
    };
    let buffer = match field {
        BookingField::DepartureDate => &mut cx.dates.departure,
        _ => &mut cx.dates.ret,
    };
    let response = ui.horizontal(|ui| {
        ui.label(label);
        ui.add(egui::TextEdit::singleline(buffer).hint_text("YYYY-MM-DD"))
    });
    let response = response.inner;
    // Unparseable text stays put until the user fixes it.
    let pending_typo = !buffer.is_empty() && NaiveDate::parse_from_str(buffer.trim(), DATE_FORMAT).is_err();
    if !response.has_focus() && !pending_typo {
        *buffer = current.map(|date| date.format(DATE_FORMAT).to_string()).unwrap_or_default();
    }
    if response.changed() {
        if let Ok(date) = NaiveDate::parse_from_str(buffer.trim(), DATE_FORMAT) {
            match field {
                BookingField::DepartureDate => cx.app.set_departure_date(date),
                _ => cx.app.set_return_date(date),
            };
        }
    }
    field_error(ui, cx, field);
}

fn details(ui: &mut egui::Ui, cx: &mut ScreenCx<'_>) {
    location_field(ui, cx, "From", BookingField::From);
    location_field(ui, cx, "To", BookingField::To);

    let mut one_way = cx.app.state().booking_details.one_way;
    if ui.checkbox(&mut one_way, "One way").changed() {
        cx.app.edit_details(DetailsEdit::OneWay(one_way));
    }

    date_field(ui, cx, BookingField::DepartureDate);
    if !one_way {
        date_field(ui, cx, BookingField::ReturnDate);
    }

    let mut passengers = cx.app.state().booking_details.passengers;
    let options = passenger_options(cx.app.details_form().max_passengers());
    let selected = options
        .iter()
        .find(|(count, _)| *count == passengers)
        .map(|(_, label)| label.clone())
        .unwrap_or_default();
    egui::ComboBox::from_id_salt("details-passengers")
        .selected_text(selected)
        .show_ui(ui, |ui| {
            for (count, label) in &options {
                ui.selectable_value(&mut passengers, *count, label);
            }
        });
    if passengers != cx.app.state().booking_details.passengers {
        cx.app.edit_details(DetailsEdit::Passengers(passengers));
    }

    ui.add_space(16.0);
    if primary_button(ui, &cx.palette, "Search flights").clicked() {
        match cx.app.submit_details() {
            Ok(_) | Err(CoreError::Validation(_)) => {}
            Err(err) => *cx.status = err.to_string(),
        }
    }
}

fn flight_row(ui: &mut egui::Ui, cx: &mut ScreenCx<'_>, leg: FlightLeg, flight: &Flight, selected: bool) {
    let fill = if selected {
        cx.palette.raised_surface
    } else {
        cx.palette.surface
    };
    let response = egui::Frame::new()
        .fill(fill)
        .corner_radius(egui::CornerRadius::same(10))
        .inner_margin(egui::Margin::same(10))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(&flight.from.time).strong());
                ui.label(egui::RichText::new(&flight.from.airport).color(cx.palette.text_muted));
                ui.label("→");
                ui.label(egui::RichText::new(&flight.to.time).strong());
                ui.label(egui::RichText::new(&flight.to.airport).color(cx.palette.text_muted));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(egui::RichText::new(format_money(u64::from(flight.price))).strong());
                });
            });
        })
        .response
        .interact(egui::Sense::click());
    if response.clicked() {
        cx.app.select_flight(leg, &flight.id);
    }
}

fn flight_items(ui: &mut egui::Ui, cx: &mut ScreenCx<'_>, leg: FlightLeg, items: &[ItemLayer], listed: &[Flight], selected: Option<&str>) {
    for item in items {
        let Some(flight) = listed.iter().find(|flight| flight.id.as_str() == item.key) else {
            continue;
        };
        let rect = ui.available_rect_before_wrap();
        let rect = rect.translate(egui::vec2(0.0, motion::rise_offset(&item.context, 16.0)));
        let used = faded(ui, rect, &item.context, |ui| {
            flight_row(ui, cx, leg, flight, selected == Some(item.key.as_str()));
            ui.min_rect().height()
        });
        ui.add_space(used + 6.0);
    }
}

fn flights(ui: &mut egui::Ui, cx: &mut ScreenCx<'_>) {
    let state = cx.app.state();
    let view = cx.app.flights_view();
    let frame = cx.app.flights_frame();

    if let Some(header) = &frame.departure_header {
        ui.label(egui::RichText::new(DEPARTURE_HEADER).strong().color(cx.palette.text_muted.gamma_multiply(header.context.visibility)));
    }
    let listed = flights::listed_flights(&state.booking_details, FlightLeg::Departure);
    let selected = view.selected_departure.as_ref().map(|id| id.as_str());
    flight_items(ui, cx, FlightLeg::Departure, &frame.departures, &listed, selected);

    if let Some(header) = &frame.return_header {
        ui.add_space(8.0);
        ui.label(egui::RichText::new(RETURN_HEADER).strong().color(cx.palette.text_muted.gamma_multiply(header.context.visibility)));
    }
    let listed = flights::listed_flights(&state.booking_details, FlightLeg::Return);
    let selected = view.selected_return.as_ref().map(|id| id.as_str());
    flight_items(ui, cx, FlightLeg::Return, &frame.returns, &listed, selected);

    ui.add_space(12.0);
    ui.label(&view.total_label);
    ui.add_enabled_ui(view.can_continue, |ui| {
        if primary_button(ui, &cx.palette, "Continue").clicked() {
            if let Err(err) = cx.app.continue_from_flights() {
                *cx.status = err.to_string();
            }
        }
    });
}

fn passengers(ui: &mut egui::Ui, cx: &mut ScreenCx<'_>) {
    let state = cx.app.state();
    card(ui, &cx.palette, |ui| {
        ui.label(egui::RichText::new(state.user.full_name()).strong());
        ui.label(egui::RichText::new(PRIMARY_USER_TAG).small().color(cx.palette.text_muted));
    });

    for item in cx.app.passenger_rows() {
        let Some(index) = state
            .passenger_data
            .iter()
            .position(|stub| stub.id.as_str() == item.key)
        else {
            continue;
        };
        let mut email = state.passenger_data[index].email.clone();
        let rect = ui.available_rect_before_wrap();
        let used = faded(ui, rect, &item.context, |ui| {
            ui.label(passenger_label(index));
            let row = ui.horizontal(|ui| {
                let edit = ui.add(
                    egui::TextEdit::singleline(&mut email)
                        .hint_text(EMAIL_PLACEHOLDER)
                        .desired_width(ui.available_width() - 40.0),
                );
                (edit.changed(), ui.small_button("✕").clicked())
            });
            (row.inner, ui.min_rect().height())
        });
        let ((changed, remove), height) = used;
        if changed {
            cx.app.set_passenger_email(index, &email);
        }
        if remove {
            cx.app.remove_passenger(index);
        }
        ui.add_space(height + 6.0);
    }

    let contacts = cx.app.available_users();
    if !contacts.is_empty() {
        ui.label(egui::RichText::new("Share with").small().color(cx.palette.text_muted));
        ui.horizontal_wrapped(|ui| {
            for contact in contacts {
                if ui.button(contact.full_name()).clicked() {
                    let empty = cx
                        .app
                        .state()
                        .passenger_data
                        .iter()
                        .position(|stub| stub.email.is_empty());
                    if let Some(index) = empty {
                        cx.app.set_passenger_email(index, &contact.email);
                    }
                }
            }
        });
    }

    if ui.button("Add passenger").clicked() && !cx.app.add_passenger() {
        *cx.status = "Passenger limit reached".to_string();
    }
    ui.add_space(12.0);
    if primary_button(ui, &cx.palette, "Continue").clicked() {
        if let Err(err) = cx.app.continue_from_passengers() {
            *cx.status = err.to_string();
        }
    }
}

fn payment(ui: &mut egui::Ui, cx: &mut ScreenCx<'_>) {
    let state = cx.app.state();
    let frame = cx.app.payment_frame();

    if let Some(form) = &frame.form {
        let rect = ui.available_rect_before_wrap();
        let used = faded(ui, rect, &form.context, |ui| {
            card(ui, &cx.palette, |ui| {
                ui.label(egui::RichText::new(payment::card_description(&state)).strong());
                ui.label(egui::RichText::new(&state.user.card.expiry).small().color(cx.palette.text_muted));
            });
            ui.add_space(12.0);
            let label = if frame.loading {
                "Processing…".to_string()
            } else {
                payment::pay_label(&state)
            };
            let clicked = ui
                .add_enabled_ui(frame.status == PaymentStatus::Idle, |ui| primary_button(ui, &cx.palette, &label).clicked())
                .inner;
            (clicked, ui.min_rect().height())
        });
        let (clicked, height) = used;
        if clicked {
            match cx.app.begin_payment() {
                Ok(request) => {
                    if !dispatch_backend_command(cx.cmd_tx, BackendCommand::ProcessPayment(request), cx.status) {
                        cx.app.cancel_payment();
                    }
                }
                Err(err) => *cx.status = err.to_string(),
            }
        }
        ui.add_space(height);
    }

    if let Some(success) = &frame.success {
        let rect = ui.available_rect_before_wrap();
        let rect = rect.translate(egui::vec2(0.0, motion::rise_offset(&success.context, 24.0)));
        let go = faded(ui, rect, &success.context, |ui| {
            ui.label(egui::RichText::new(payment::success_message(state.booking_details.one_way)).size(20.0).strong());
            ui.add_space(12.0);
            primary_button(ui, &cx.palette, "View boarding pass").clicked()
        });
        if go {
            cx.go(payment::success_route());
        }
    }
}

fn summary_card(ui: &mut egui::Ui, cx: &mut ScreenCx<'_>) {
    let Some(view) = cx.app.summary() else {
        return;
    };
    let frame = cx.app.summary_frame();
    let fill = if view.raised {
        cx.palette.raised_surface
    } else {
        cx.palette.surface
    };
    let header_clicked = egui::Frame::new()
        .fill(fill)
        .corner_radius(egui::CornerRadius::same(12))
        .inner_margin(egui::Margin::same(10))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            let card_top = ui.min_rect().min.y;
            let header = ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label(egui::RichText::new(format!("{} → {}", view.from_airport, view.to_airport)).strong());
                    ui.label(egui::RichText::new(&view.description).small().color(cx.palette.text_muted));
                });
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(egui::RichText::new(&view.total).size(18.0).strong());
                });
            });
            let clicked = header.response.interact(egui::Sense::click()).clicked();

            if let Some(content) = &frame.content {
                let height = frame.content_height * content.context.visibility;
                let (rect, _) = ui.allocate_exact_size(egui::vec2(ui.available_width(), height), egui::Sense::hover());
                let natural = frame.measurement.height().unwrap_or_default();
                let measured = faded(ui, rect.with_max_y(rect.min.y + natural), &content.context, |ui| {
                    for item in &view.items {
                        ui.horizontal(|ui| {
                            ui.label(format!("{} → {}", item.from_airport, item.to_airport));
                            ui.label(egui::RichText::new(&item.schedule).small().color(cx.palette.text_muted));
                            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                ui.label(&item.price);
                            });
                        });
                    }
                    ui.min_rect().height()
                });
                if frame.measurement.height().is_none_or(|height| (measured - height).abs() > 0.5) {
                    cx.app.measure_summary(measured);
                } else if frame.measurement.offset().is_none() {
                    cx.app.position_summary(rect.min.y - card_top);
                }
            }
            clicked
        })
        .inner;
    if header_clicked {
        cx.app.toggle_summary();
    }
}

pub fn boarding_pass(ui: &mut egui::Ui, cx: &mut ScreenCx<'_>) {
    let Some(view) = cx.app.boarding_pass_view() else {
        return;
    };
    scrolled(ui, cx, "boarding-pass", |ui, cx| {
        card(ui, &cx.palette, |ui| {
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label(egui::RichText::new(&view.from.airport).size(32.0).strong());
                    ui.label(&view.from.city);
                    ui.label(egui::RichText::new(view.from_label()).small().color(cx.palette.text_muted));
                });
                ui.label(egui::RichText::new(DURATION_LABEL).small());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                    ui.vertical(|ui| {
                        ui.label(egui::RichText::new(&view.to.airport).size(32.0).strong());
                        ui.label(&view.to.city);
                        ui.label(egui::RichText::new(view.to_label()).small().color(cx.palette.text_muted));
                    });
                });
            });
            ui.separator();
            egui::Grid::new("boarding-pass-facts").num_columns(4).show(ui, |ui| {
                for (label, value) in [
                    ("Gate", &view.gate),
                    ("Boarding", &view.boarding_time),
                    ("Seat", &view.seat),
                    ("Flight", &view.flight_number),
                ] {
                    ui.vertical(|ui| {
                        ui.label(egui::RichText::new(label).small().color(cx.palette.text_muted));
                        ui.label(egui::RichText::new(value.as_str()).strong());
                    });
                }
                ui.end_row();
            });
            ui.label(egui::RichText::new(BAGGAGE).small().color(cx.palette.text_muted));
        });
        ui.add_space(12.0);
        for passenger in &view.passengers {
            ui.horizontal(|ui| {
                ui.label(passenger.name.as_deref().unwrap_or(&passenger.email));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(passenger.check_in.label());
                });
            });
        }
        ui.add_space(16.0);
        if ui.button("Back to home").clicked() {
            cx.go(Location::root().path());
        }
    });
}
