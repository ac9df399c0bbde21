use crate::domain::{BookingTransaction, OfficeSpace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Sms,
    WhatsApp,
}

impl Channel {
    /// Formats a phone number as a provider address: `+62...` or
    /// `whatsapp:+62...`.
    pub fn address(self, phone_number: &str) -> String {
        let number = phone_number
            .trim()
            .trim_start_matches("whatsapp:")
            .trim_start_matches('+');
        match self {
            Channel::Sms => format!("+{}", number),
            Channel::WhatsApp => format!("whatsapp:+{}", number),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageTemplate {
    BookingCreated,
    BookingApproved,
}

impl MessageTemplate {
    pub fn channel(self) -> Channel {
        match self {
            MessageTemplate::BookingCreated => Channel::Sms,
            MessageTemplate::BookingApproved => Channel::WhatsApp,
        }
    }

    pub fn render(
        self,
        booking: &BookingTransaction,
        office: &OfficeSpace,
        support_contact: Option<&str>,
    ) -> String {
        match self {
            MessageTemplate::BookingCreated => format!(
                "Booking Anda untuk office di {} dengan ID: {} telah berhasil dibuat.",
                office.name, booking.booking_trx_id
            ),
            MessageTemplate::BookingApproved => {
                let mut body = format!(
                    "Hi {}, pemesanan Anda dengan kode {} sudah terverifikasi.\n\n\
                     Silakan datang ke lokasi kantor {} di {} untuk mulai menggunakan layanan.",
                    booking.name, booking.booking_trx_id, office.name, office.address
                );
                if let Some(contact) = support_contact {
                    body.push_str(&format!(
                        "\n\nJika Anda memiliki pertanyaan, silakan menghubungi CS kami di {}.",
                        contact
                    ));
                }
                body
            }
        }
    }
}
