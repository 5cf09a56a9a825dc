#[cfg(test)]
pub const POST_WITH_FRONT_MATTER: &str = r##"---
title: "Fix USB device not recognized"
description: "What to do when Windows stops seeing your USB drive"
date: "2024-03-18"
author: "sofia"
category: "Hardware"
tags: ["usb", "windows"]
---
When a USB device stops responding, start with the cable.

## Check the obvious first

Swap ports before blaming the device. Front-panel ports share a single
header and fail together.

### Try another cable

Cables fail far more often than ports do.

## Update the driver

Open Device Manager, find the device under Universal Serial Bus
controllers and pick *Update driver*.
"##;

#[cfg(test)]
pub const POST_NO_FRONT_MATTER: &str = r##"A bare article without any metadata block.

## Only heading

Nothing else to see here.
"##;
