//! Booking-creation form state.
//!
//! All form fields live in one [`BookingForm`] value. Edits go through
//! [`BookingForm::reduce`], which never mutates in place and reports problems
//! as a [`Notice`] instead of showing anything itself. [`FormSession`] owns a
//! form plus a [`Notifier`] and is what a view would drive.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};

use crate::{
    BOOKING_CREATED_MESSAGE, CREATE_BOOKING_PATH, MISSING_FIELDS_MESSAGE, NormalizedStay, Notice, Notifier,
    SOMETHING_WENT_WRONG_MESSAGE, StayConfig, StayRange, StaySelection,
};

/// Errors raised while turning the form into a create-booking request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    /// One or more required fields are empty.
    #[error("{}", MISSING_FIELDS_MESSAGE)]
    MissingFields,

    /// A numeric text field does not hold a whole non-negative number.
    #[error("Invalid number for {field}: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    /// A dropdown value outside the known options.
    #[error("Unknown {field}: {value:?}")]
    UnknownChoice { field: &'static str, value: String },
}

/// Single-choice dropdown options, serialized with the labels the server expects.
macro_rules! choice {
    ($(#[$meta:meta])* $name:ident, $field:literal { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = FormError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|choice| choice.as_str().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| FormError::UnknownChoice {
                        field: $field,
                        value: s.to_owned(),
                    })
            }
        }
    };
}

choice!(
    /// How the booking reached the property
    BookingType, "bookingType" {
        Online => "Online",
        Offline => "Offline",
    }
);

choice!(
    RoomCategory, "roomCategory" {
        Ac => "AC",
        NonAc => "Non-AC",
    }
);

choice!(
    /// Occupancy of the booked room
    RoomType, "roomType" {
        Single => "Single",
        Double => "Double",
        Triple => "Triple",
    }
);

choice!(
    BookingStatus, "bookingStatus" {
        Pending => "Pending",
        Confirmed => "Confirmed",
        Cancelled => "Cancelled",
    }
);

choice!(
    /// Whether the guest has paid; `Paid` unlocks the payment details section
    PaymentStatus, "paymentStatus" {
        Paid => "Paid",
        Unpaid => "Unpaid",
    }
);

choice!(
    PaymentMethod, "paymentMethod" {
        Cash => "Cash",
        Upi => "UPI",
        Card => "Card",
        BankTransfer => "Bank Transfer",
    }
);

/// One user edit to the booking form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    SelectProperty(String),
    SelectBookingType(BookingType),
    SetGuests(String),
    SelectRoomCategory(RoomCategory),
    SelectRoomType(RoomType),
    SelectBookingStatus(BookingStatus),
    /// A new pick on the range calendar
    PickStay(StayRange),
    SelectPaymentStatus(PaymentStatus),
    SelectPaymentMethod(PaymentMethod),
    SetPaymentAmount(String),
    SetPrimaryGuestName(String),
    SetGuestPhone(String),
    SetGuestEmail(String),
    Reset,
}

/// Complete state of the booking-creation form.
///
/// Text fields hold exactly what was typed; numbers are parsed on submit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingForm {
    property_id:        Option<String>,
    booking_type:       Option<BookingType>,
    guests:             String,
    room_category:      Option<RoomCategory>,
    room_type:          Option<RoomType>,
    booking_status:     Option<BookingStatus>,
    stay:               StaySelection,
    payment_status:     Option<PaymentStatus>,
    payment_method:     Option<PaymentMethod>,
    payment_amount:     String,
    primary_guest_name: String,
    guest_phone:        String,
    guest_email:        String,
}

/// Output of [`BookingForm::reduce`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reduced {
    pub form:   BookingForm,
    pub notice: Option<Notice>,
}

impl BookingForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies `action` and returns the next form state.
    ///
    /// A rejected stay pick returns an unchanged form together with the error
    /// notice for the user.
    pub fn reduce(&self, action: FormAction, config: &StayConfig) -> Reduced {
        let mut form = self.clone();
        let mut notice = None;

        match action {
            FormAction::SelectProperty(id) => form.property_id = Some(id),
            FormAction::SelectBookingType(choice) => form.booking_type = Some(choice),
            FormAction::SetGuests(text) => form.guests = text,
            FormAction::SelectRoomCategory(choice) => form.room_category = Some(choice),
            FormAction::SelectRoomType(choice) => form.room_type = Some(choice),
            FormAction::SelectBookingStatus(choice) => form.booking_status = Some(choice),
            FormAction::PickStay(range) => {
                if let Err(err) = form.stay.apply(&range, config) {
                    notice = Some(Notice::error(err.to_string()));
                }
            },
            FormAction::SelectPaymentStatus(choice) => form.payment_status = Some(choice),
            FormAction::SelectPaymentMethod(choice) => form.payment_method = Some(choice),
            FormAction::SetPaymentAmount(text) => form.payment_amount = text,
            FormAction::SetPrimaryGuestName(text) => form.primary_guest_name = text,
            FormAction::SetGuestPhone(text) => form.guest_phone = text,
            FormAction::SetGuestEmail(text) => form.guest_email = text,
            FormAction::Reset => form = Self::default(),
        }

        Reduced { form, notice }
    }

    pub const fn stay(&self) -> &StaySelection {
        &self.stay
    }

    pub const fn booking_type(&self) -> Option<BookingType> {
        self.booking_type
    }

    pub const fn payment_status(&self) -> Option<PaymentStatus> {
        self.payment_status
    }

    /// Payment method and amount inputs are only shown for paid bookings
    pub fn payment_details_visible(&self) -> bool {
        self.payment_status == Some(PaymentStatus::Paid)
    }

    /// Builds the create-booking request body for `user_id`.
    ///
    /// # Errors
    /// `FormError::MissingFields` if a required field is empty or the stay is
    /// not committed; `FormError::InvalidNumber` for unparsable numeric text.
    pub fn to_request(&self, user_id: &str) -> Result<CreateBookingRequest, FormError> {
        let (
            Some(property_id),
            Some(room_category),
            Some(room_type),
            Some(stay),
            Some(payment_status),
            Some(guests),
            Some(booking_type),
            Some(booking_status),
            Some(primary_guest_name),
            Some(guest_phone),
        ) = (
            self.property_id.as_deref().and_then(filled),
            self.room_category,
            self.room_type,
            self.stay.committed(),
            self.payment_status,
            filled(&self.guests),
            self.booking_type,
            self.booking_status,
            filled(&self.primary_guest_name),
            filled(&self.guest_phone),
        )
        else {
            return Err(FormError::MissingFields);
        };

        let payment_amount = match filled(&self.payment_amount) {
            Some(text) => parse_number("paymentAmount", text)?,
            None => 0,
        };

        Ok(CreateBookingRequest {
            property_id: property_id.to_owned(),
            room_category,
            room_type,
            stay: *stay,
            payment_status,
            number_of_guests: parse_number("numberOfGuests", guests)?,
            payment_amount,
            booking_type,
            booking_status,
            payment_method: self.payment_method,
            primary_guest_name: primary_guest_name.to_owned(),
            guest_phone_number: parse_number("guestPhoneNumber", guest_phone)?,
            guest_email: self.guest_email.trim().to_owned(),
            user_id: user_id.to_owned(),
        })
    }
}

fn filled(text: &str) -> Option<&str> {
    let text = text.trim();
    (!text.is_empty()).then_some(text)
}

fn parse_number<T: FromStr>(field: &'static str, text: &str) -> Result<T, FormError> {
    text.parse().map_err(|_| FormError::InvalidNumber {
        field,
        value: text.to_owned(),
    })
}

/// Body of the create-booking call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub property_id:        String,
    pub room_category:      RoomCategory,
    pub room_type:          RoomType,
    /// Sent as `from`, `to` and `noOfMonths`
    #[serde(flatten)]
    pub stay:               NormalizedStay,
    pub payment_status:     PaymentStatus,
    pub number_of_guests:   u32,
    pub payment_amount:     u64,
    pub booking_type:       BookingType,
    pub booking_status:     BookingStatus,
    #[serde(serialize_with = "choice_or_empty")]
    pub payment_method:     Option<PaymentMethod>,
    pub primary_guest_name: String,
    pub guest_phone_number: u64,
    pub guest_email:        String,
    pub user_id:            String,
}

impl CreateBookingRequest {
    /// Path of the endpoint this body is posted to
    pub const fn path(&self) -> &'static str {
        CREATE_BOOKING_PATH
    }
}

// The server takes an empty string for "no payment method".
#[allow(clippy::ref_option)]
fn choice_or_empty<S: Serializer>(choice: &Option<PaymentMethod>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(choice.map_or("", PaymentMethod::as_str))
}

/// Reply body of the remote API; `message` is shown to the user when present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ServerReply {
    #[serde(default)]
    pub message: Option<String>,
}

/// A booking form bound to its stay limits and a notice channel.
#[derive(Debug)]
pub struct FormSession<N> {
    form:     BookingForm,
    config:   StayConfig,
    notifier: N,
}

impl<N: Notifier> FormSession<N> {
    pub fn new(config: StayConfig, notifier: N) -> Self {
        Self {
            form: BookingForm::default(),
            config,
            notifier,
        }
    }

    pub const fn form(&self) -> &BookingForm {
        &self.form
    }

    pub const fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Applies one edit and forwards any notice it produced.
    pub fn dispatch(&mut self, action: FormAction) {
        let Reduced { form, notice } = self.form.reduce(action, &self.config);
        self.form = form;
        if let Some(notice) = notice {
            self.notifier.notify(notice);
        }
    }

    /// Builds the request for `user_id`, or reports why it can't be built.
    pub fn submit(&mut self, user_id: &str) -> Option<CreateBookingRequest> {
        match self.form.to_request(user_id) {
            Ok(request) => {
                log::debug!("submitting booking for property {}", request.property_id);
                Some(request)
            },
            Err(err) => {
                log::warn!("booking not submitted: {err}");
                self.notifier.notify(Notice::error(err.to_string()));
                None
            },
        }
    }

    /// Reports the server's answer to a submitted request.
    /// A successful booking clears the form.
    pub fn finish_submit(&mut self, reply: Result<ServerReply, ServerReply>) {
        match reply {
            Ok(reply) => {
                let message = reply.message.unwrap_or_else(|| BOOKING_CREATED_MESSAGE.to_owned());
                self.notifier.notify(Notice::success(message));
                self.form = BookingForm::default();
            },
            Err(reply) => {
                let message = reply.message.unwrap_or_else(|| SOMETHING_WENT_WRONG_MESSAGE.to_owned());
                log::error!("create booking failed: {message}");
                self.notifier.notify(Notice::error(message));
            },
        }
    }

    pub fn into_parts(self) -> (BookingForm, N) {
        (self.form, self.notifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RecordingNotifier;
    use crate::test_utils::{date, pick};

    fn filled_form() -> BookingForm {
        let config = StayConfig::default();
        [
            FormAction::SelectProperty("prop-42".to_owned()),
            FormAction::SelectBookingType(BookingType::Online),
            FormAction::SetGuests("2".to_owned()),
            FormAction::SelectRoomCategory(RoomCategory::Ac),
            FormAction::SelectRoomType(RoomType::Double),
            FormAction::SelectBookingStatus(BookingStatus::Confirmed),
            FormAction::PickStay(pick((2024, 1, 15), (2024, 3, 10))),
            FormAction::SelectPaymentStatus(PaymentStatus::Paid),
            FormAction::SelectPaymentMethod(PaymentMethod::Upi),
            FormAction::SetPaymentAmount("15000".to_owned()),
            FormAction::SetPrimaryGuestName("Asha Rao".to_owned()),
            FormAction::SetGuestPhone("9876543210".to_owned()),
            FormAction::SetGuestEmail("asha@example.com".to_owned()),
        ]
        .into_iter()
        .fold(BookingForm::new(), |form, action| form.reduce(action, &config).form)
    }

    #[test]
    fn test_choice_labels_round_trip() {
        for choice in PaymentMethod::ALL {
            assert_eq!(choice.as_str().parse::<PaymentMethod>(), Ok(*choice));
        }
        assert_eq!("non-ac".parse::<RoomCategory>(), Ok(RoomCategory::NonAc));
        assert_eq!(
            "Quad".parse::<RoomType>(),
            Err(FormError::UnknownChoice {
                field: "roomType",
                value: "Quad".to_owned(),
            })
        );
    }

    #[test]
    fn test_choice_serde_uses_labels() {
        assert_eq!(
            serde_json::to_string(&PaymentMethod::BankTransfer).expect("serialize choice"),
            r#""Bank Transfer""#
        );
        let parsed: RoomCategory = serde_json::from_str(r#""Non-AC""#).expect("deserialize choice");
        assert_eq!(parsed, RoomCategory::NonAc);
    }

    #[test]
    fn test_reduce_is_pure() {
        let form = BookingForm::new();
        let next = form.reduce(FormAction::SetGuests("3".to_owned()), &StayConfig::default());
        assert_eq!(form, BookingForm::default(), "reduce must not touch the input state");
        assert_ne!(next.form, form);
        assert!(next.notice.is_none());
    }

    #[test]
    fn test_invalid_stay_keeps_form_and_raises_notice() {
        let form = filled_form();
        let next = form.reduce(FormAction::PickStay(pick((2024, 1, 15), (2024, 9, 1))), &StayConfig::default());

        assert_eq!(next.form, form);
        assert_eq!(
            next.notice,
            Some(Notice::error("Stay duration should be within 6 months only."))
        );
        assert_eq!(next.form.stay().months(), 3);
    }

    #[test]
    fn test_partial_pick_clears_committed_stay() {
        let form = filled_form();
        let next = form.reduce(
            FormAction::PickStay(StayRange::new(Some(date(2024, 4, 2)), None)),
            &StayConfig::default(),
        );
        assert!(next.notice.is_none());
        assert_eq!(next.form.stay().months(), 0);
        assert_eq!(next.form.to_request("user-1"), Err(FormError::MissingFields));
    }

    #[test]
    fn test_payment_details_visibility() {
        let config = StayConfig::default();
        let form = BookingForm::new();
        assert!(!form.payment_details_visible());

        let paid = form.reduce(FormAction::SelectPaymentStatus(PaymentStatus::Paid), &config).form;
        assert!(paid.payment_details_visible());
        assert_eq!(paid.payment_status(), Some(PaymentStatus::Paid));

        let unpaid = paid.reduce(FormAction::SelectPaymentStatus(PaymentStatus::Unpaid), &config).form;
        assert!(!unpaid.payment_details_visible());
    }

    #[test]
    fn test_to_request_fields() {
        let request = filled_form().to_request("user-1").expect("complete form");

        assert_eq!(request.property_id, "prop-42");
        assert_eq!(request.stay.from(), date(2024, 1, 1));
        assert_eq!(request.stay.to(), date(2024, 3, 31));
        assert_eq!(request.stay.months(), 3);
        assert_eq!(request.number_of_guests, 2);
        assert_eq!(request.payment_amount, 15000);
        assert_eq!(request.guest_phone_number, 9_876_543_210);
        assert_eq!(request.path(), "/user/create-booking");
    }

    #[test]
    fn test_request_json_shape() {
        let request = filled_form().to_request("user-1").expect("complete form");
        let json = serde_json::to_value(&request).expect("serialize request");

        assert_eq!(
            json,
            serde_json::json!({
                "propertyId": "prop-42",
                "roomCategory": "AC",
                "roomType": "Double",
                "from": "2024-01-01",
                "to": "2024-03-31",
                "noOfMonths": 3,
                "paymentStatus": "Paid",
                "numberOfGuests": 2,
                "paymentAmount": 15000,
                "bookingType": "Online",
                "bookingStatus": "Confirmed",
                "paymentMethod": "UPI",
                "primaryGuestName": "Asha Rao",
                "guestPhoneNumber": 9_876_543_210_u64,
                "guestEmail": "asha@example.com",
                "userId": "user-1"
            })
        );
    }

    #[test]
    fn test_optional_fields_default() {
        let config = StayConfig::default();
        let form = filled_form()
            .reduce(FormAction::SetPaymentAmount("  ".to_owned()), &config)
            .form
            .reduce(FormAction::SetGuestEmail(String::new()), &config)
            .form;
        let mut request = form.to_request("user-1").expect("optional fields may be empty");
        assert_eq!(request.payment_amount, 0);
        assert_eq!(request.guest_email, "");

        request.payment_method = None;
        let json = serde_json::to_value(&request).expect("serialize request");
        assert_eq!(json["paymentMethod"], "");
    }

    #[test]
    fn test_missing_required_fields() {
        struct TestCase {
            action:      FormAction,
            description: &'static str,
        }

        let cases = [
            TestCase { action: FormAction::SelectProperty("  ".to_owned()), description: "blank property" },
            TestCase { action: FormAction::SetGuests(String::new()), description: "no guest count" },
            TestCase { action: FormAction::SetPrimaryGuestName(String::new()), description: "no guest name" },
            TestCase { action: FormAction::SetGuestPhone(" ".to_owned()), description: "no phone" },
        ];

        let config = StayConfig::default();
        for case in cases {
            let form = filled_form().reduce(case.action, &config).form;
            let err = form.to_request("user-1").expect_err(case.description);
            assert_eq!(err, FormError::MissingFields, "{}", case.description);
            assert_eq!(err.to_string(), "Please fill all the fields");
        }

        assert_eq!(BookingForm::new().to_request("user-1"), Err(FormError::MissingFields));
    }

    #[test]
    fn test_invalid_numbers() {
        let config = StayConfig::default();
        let form = filled_form().reduce(FormAction::SetGuests("two".to_owned()), &config).form;
        assert_eq!(
            form.to_request("user-1"),
            Err(FormError::InvalidNumber {
                field: "numberOfGuests",
                value: "two".to_owned(),
            })
        );

        let form = filled_form().reduce(FormAction::SetPaymentAmount("-5".to_owned()), &config).form;
        assert!(matches!(
            form.to_request("user-1"),
            Err(FormError::InvalidNumber { field: "paymentAmount", .. })
        ));
    }

    #[test]
    fn test_reset_clears_everything() {
        let form = filled_form().reduce(FormAction::Reset, &StayConfig::default()).form;
        assert_eq!(form, BookingForm::default());
        assert_eq!(form.booking_type(), None);
    }

    #[test]
    fn test_session_reports_rejected_pick_once() {
        let mut session = FormSession::new(StayConfig::default(), RecordingNotifier::new());
        session.dispatch(FormAction::PickStay(pick((2024, 2, 5), (2024, 4, 20))));
        let committed = *session.form().stay();

        session.dispatch(FormAction::PickStay(pick((2024, 2, 5), (2024, 12, 20))));

        assert_eq!(*session.form().stay(), committed);
        assert_eq!(
            session.notifier().errors().collect::<Vec<_>>(),
            ["Stay duration should be within 6 months only."]
        );
    }

    #[test]
    fn test_session_submit_incomplete_form() {
        let mut session = FormSession::new(StayConfig::default(), RecordingNotifier::new());
        session.dispatch(FormAction::SetGuests("2".to_owned()));

        assert!(session.submit("user-1").is_none());
        assert_eq!(session.notifier().errors().collect::<Vec<_>>(), ["Please fill all the fields"]);
    }

    #[test]
    fn test_session_submit_and_reply() {
        let mut session = FormSession::new(StayConfig::new(3).expect("valid config"), RecordingNotifier::new());
        for action in [
            FormAction::SelectProperty("prop-7".to_owned()),
            FormAction::SelectBookingType(BookingType::Offline),
            FormAction::SetGuests("1".to_owned()),
            FormAction::SelectRoomCategory(RoomCategory::NonAc),
            FormAction::SelectRoomType(RoomType::Single),
            FormAction::SelectBookingStatus(BookingStatus::Pending),
            FormAction::PickStay(pick((2024, 11, 3), (2025, 1, 2))),
            FormAction::SelectPaymentStatus(PaymentStatus::Unpaid),
            FormAction::SetPrimaryGuestName("Ravi".to_owned()),
            FormAction::SetGuestPhone("9000000000".to_owned()),
        ] {
            session.dispatch(action);
        }

        let request = session.submit("owner-9").expect("complete form");
        assert_eq!(request.stay.months(), 3);
        assert_eq!(request.payment_method, None);
        assert_eq!(request.user_id, "owner-9");

        session.finish_submit(Err(ServerReply::default()));
        assert_ne!(*session.form(), BookingForm::default(), "failed submit keeps the form");

        let reply: ServerReply = serde_json::from_str(r#"{ "message": "Booking saved" }"#).expect("parse reply");
        session.finish_submit(Ok(reply));
        assert_eq!(*session.form(), BookingForm::default());

        let (_, notifier) = session.into_parts();
        assert_eq!(
            notifier.notices(),
            [Notice::error("Something went wrong"), Notice::success("Booking saved")]
        );
    }

    #[test]
    fn test_session_default_success_message() {
        let mut session = FormSession::new(StayConfig::default(), RecordingNotifier::new());
        session.finish_submit(Ok(ServerReply::default()));
        assert_eq!(session.notifier().notices(), [Notice::success("Booking created successfully")]);
    }
}
