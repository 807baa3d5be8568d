//! Notifications and Announcements
//!
//! Transient banners (one at a time) and screen reader live-region text.

/// Banner flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

impl NoticeKind {
    pub fn css_class(self) -> &'static str {
        match self {
            NoticeKind::Success => "success",
            NoticeKind::Error => "error",
        }
    }

    pub fn aria_live(self) -> &'static str {
        match self {
            NoticeKind::Success => "polite",
            NoticeKind::Error => "assertive",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub ticket: u64,
    pub message: String,
    pub kind: NoticeKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Announcement {
    pub ticket: u64,
    pub message: String,
}

/// Fire-and-forget user feedback. Implementations schedule their own dismissal.
pub trait Feedback {
    fn notify(&self, message: &str, kind: NoticeKind);
    fn announce(&self, message: &str);
}

/// Banner and announcement bookkeeping.
///
/// Every show hands out a new ticket; an expiry timer only clears the slot if
/// its ticket is still the current one, so a replaced banner's timer is inert.
#[derive(Debug, Default)]
pub struct Notices {
    next_ticket: u64,
    banner: Option<Banner>,
    announcement: Option<Announcement>,
}

impl Notices {
    pub fn new() -> Self {
        Self::default()
    }

    fn ticket(&mut self) -> u64 {
        self.next_ticket += 1;
        self.next_ticket
    }

    /// Show a banner, replacing any current one
    pub fn show(&mut self, message: &str, kind: NoticeKind) -> Banner {
        let banner = Banner { ticket: self.ticket(), message: message.to_string(), kind };
        self.banner = Some(banner.clone());
        banner
    }

    pub fn expire_banner(&mut self, ticket: u64) -> bool {
        if self.banner.as_ref().map(|b| b.ticket) == Some(ticket) {
            self.banner = None;
            true
        } else {
            false
        }
    }

    pub fn announce(&mut self, message: &str) -> Announcement {
        let announcement = Announcement { ticket: self.ticket(), message: message.to_string() };
        self.announcement = Some(announcement.clone());
        announcement
    }

    pub fn expire_announcement(&mut self, ticket: u64) -> bool {
        if self.announcement.as_ref().map(|a| a.ticket) == Some(ticket) {
            self.announcement = None;
            true
        } else {
            false
        }
    }

    #[cfg(test)]
    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    #[cfg(test)]
    pub fn announcement(&self) -> Option<&Announcement> {
        self.announcement.as_ref()
    }
}
