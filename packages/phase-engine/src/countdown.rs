use std::fmt;

use cosmwasm_schema::cw_serde;

/// Time left until a phase boundary. Hours are not rolled over into days.
#[cw_serde]
#[derive(Copy, Eq, Default)]
pub struct Countdown {
    pub hours: u64,
    pub minutes: u8,
    pub seconds: u8,
}

impl Countdown {
    pub fn is_zero(&self) -> bool {
        *self == Countdown::default()
    }

    /// Each part left-padded to two digits.
    pub fn padded(&self) -> (String, String, String) {
        (
            format!("{:02}", self.hours),
            format!("{:02}", self.minutes),
            format!("{:02}", self.seconds),
        )
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hours, self.minutes, self.seconds
        )
    }
}

pub fn remaining_time(boundary: u64, now: u64) -> Countdown {
    if boundary <= now {
        return Countdown::default();
    }
    let diff = boundary - now;
    Countdown {
        hours: diff / 3600,
        minutes: ((diff % 3600) / 60) as u8,
        seconds: (diff % 60) as u8,
    }
}
