//! Bit fields of the STM32G0 I2C controller (RM0444, I2C v2 revision).
//!
//! Only the layout lives here. The memory-mapped register block is declared by
//! the firmware, which keeps this crate buildable and testable on the host.

use tock_registers::register_bitfields;

register_bitfields![u32,
    /// Control register 1
    pub CR1 [
        /// Peripheral enable
        PE OFFSET(0) NUMBITS(1) [],
        TXIE OFFSET(1) NUMBITS(1) [],
        RXIE OFFSET(2) NUMBITS(1) [],
        NACKIE OFFSET(4) NUMBITS(1) [],
        STOPIE OFFSET(5) NUMBITS(1) [],
        TCIE OFFSET(6) NUMBITS(1) [],
        ERRIE OFFSET(7) NUMBITS(1) [],
        /// Digital noise filter, in kernel clock periods
        DNF OFFSET(8) NUMBITS(4) [],
        /// Analog noise filter off
        ANFOFF OFFSET(12) NUMBITS(1) [],
        TXDMAEN OFFSET(14) NUMBITS(1) [],
        RXDMAEN OFFSET(15) NUMBITS(1) []
    ],
    /// Control register 2
    pub CR2 [
        /// Target address. For 7-bit addressing bits 7:1 carry the address.
        SADD OFFSET(0) NUMBITS(10) [],
        /// Transfer direction
        RD_WRN OFFSET(10) NUMBITS(1) [
            Write = 0,
            Read = 1
        ],
        ADD10 OFFSET(11) NUMBITS(1) [],
        HEAD10R OFFSET(12) NUMBITS(1) [],
        /// Generate (repeated) start condition
        START OFFSET(13) NUMBITS(1) [],
        /// Generate stop condition after the current byte
        STOP OFFSET(14) NUMBITS(1) [],
        NACK OFFSET(15) NUMBITS(1) [],
        /// Number of bytes in the transfer
        NBYTES OFFSET(16) NUMBITS(8) [],
        RELOAD OFFSET(24) NUMBITS(1) [],
        /// Automatic stop once NBYTES are transferred
        AUTOEND OFFSET(25) NUMBITS(1) [
            Software = 0,
            Automatic = 1
        ],
        PECBYTE OFFSET(26) NUMBITS(1) []
    ],
    /// Timing register
    pub TIMINGR [
        SCLL OFFSET(0) NUMBITS(8) [],
        SCLH OFFSET(8) NUMBITS(8) [],
        SDADEL OFFSET(16) NUMBITS(4) [],
        SCLDEL OFFSET(20) NUMBITS(4) [],
        PRESC OFFSET(28) NUMBITS(4) []
    ],
    /// Interrupt and status register
    pub ISR [
        /// Transmit data register empty
        TXE OFFSET(0) NUMBITS(1) [],
        /// Transmit interrupt status, TXDR must be written
        TXIS OFFSET(1) NUMBITS(1) [],
        /// Receive data register not empty
        RXNE OFFSET(2) NUMBITS(1) [],
        ADDR OFFSET(3) NUMBITS(1) [],
        /// Not acknowledge received
        NACKF OFFSET(4) NUMBITS(1) [],
        /// Stop detection
        STOPF OFFSET(5) NUMBITS(1) [],
        /// Transfer complete (software end mode)
        TC OFFSET(6) NUMBITS(1) [],
        TCR OFFSET(7) NUMBITS(1) [],
        BERR OFFSET(8) NUMBITS(1) [],
        ARLO OFFSET(9) NUMBITS(1) [],
        OVR OFFSET(10) NUMBITS(1) [],
        BUSY OFFSET(15) NUMBITS(1) []
    ],
    /// Interrupt clear register
    pub ICR [
        ADDRCF OFFSET(3) NUMBITS(1) [],
        NACKCF OFFSET(4) NUMBITS(1) [],
        STOPCF OFFSET(5) NUMBITS(1) [],
        BERRCF OFFSET(8) NUMBITS(1) [],
        ARLOCF OFFSET(9) NUMBITS(1) [],
        OVRCF OFFSET(10) NUMBITS(1) []
    ],
    pub RXDR [
        RXDATA OFFSET(0) NUMBITS(8) []
    ],
    pub TXDR [
        TXDATA OFFSET(0) NUMBITS(8) []
    ]
];
