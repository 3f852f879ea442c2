// SPDX-FileCopyrightText: 2026 sshm Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query modules for profiles and logins.

pub mod logins;
pub mod profiles;
