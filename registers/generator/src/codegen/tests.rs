// Licensed under the Apache-2.0 license

//! Tests for the code generator.

mod test {
    use super::super::{
        derive_peripheral, derive_peripherals, generate_from_device, generate_from_file,
        output_file_names,
    };
    use crate::access::AccessType;
    use crate::config::{FilterConfig, RenderOptions};
    use crate::error::DeriveError;
    use std::path::Path;

    const DEVICE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<device schemaVersion="1.1">
  <name>RP2040</name>
  <peripherals>
    <peripheral>
      <name>UART0</name>
      <description>UART block</description>
      <baseAddress>0x40034000</baseAddress>
      <registers>
        <register>
          <name>UARTCR</name>
          <description>Control Register</description>
          <addressOffset>0x30</addressOffset>
          <resetValue>0x00000012</resetValue>
          <fields>
            <field>
              <name>UARTEN</name>
              <bitOffset>0</bitOffset>
              <bitWidth>1</bitWidth>
              <access>read-write</access>
            </field>
            <field>
              <name>MODE</name>
              <bitOffset>1</bitOffset>
              <bitWidth>4</bitWidth>
              <access>read-write</access>
              <enumeratedValues>
                <enumeratedValue>
                  <name>IDLE</name>
                  <value>0x0</value>
                </enumeratedValue>
                <enumeratedValue>
                  <name>RUN</name>
                  <description>Running</description>
                  <value>0b10x1</value>
                </enumeratedValue>
              </enumeratedValues>
            </field>
          </fields>
        </register>
        <register>
          <name>UARTFR</name>
          <addressOffset>0x18</addressOffset>
          <resetValue>0x90</resetValue>
          <fields>
            <field>
              <name>BUSY</name>
              <bitOffset>3</bitOffset>
              <bitWidth>1</bitWidth>
              <access>read-only</access>
            </field>
            <field>
              <name>TXFE</name>
              <bitOffset>7</bitOffset>
              <bitWidth>1</bitWidth>
              <access>read-only</access>
            </field>
          </fields>
        </register>
        <register>
          <name>UARTICR</name>
          <addressOffset>0x44</addressOffset>
          <fields>
            <field>
              <name>RXIC</name>
              <bitOffset>4</bitOffset>
              <bitWidth>1</bitWidth>
              <access>read-write</access>
              <modifiedWriteValues>oneToClear</modifiedWriteValues>
            </field>
          </fields>
        </register>
      </registers>
    </peripheral>
    <peripheral>
      <name>SIO</name>
      <baseAddress>0xd0000000</baseAddress>
      <registers>
        <register>
          <name>CPUID</name>
          <addressOffset>0x0</addressOffset>
          <fields>
            <field>
              <name>CPUID</name>
              <bitOffset>0</bitOffset>
              <bitWidth>32</bitWidth>
              <access>read-only</access>
            </field>
          </fields>
        </register>
      </registers>
    </peripheral>
    <peripheral>
      <name>IO_BANK0</name>
      <baseAddress>0x40014000</baseAddress>
      <registers>
        <register>
          <name>GPIO0_CTRL</name>
          <addressOffset>0x4</addressOffset>
          <resetValue>0x1f</resetValue>
          <fields>
            <field>
              <name>FUNCSEL</name>
              <bitOffset>0</bitOffset>
              <bitWidth>5</bitWidth>
              <access>read-write</access>
            </field>
          </fields>
        </register>
      </registers>
    </peripheral>
  </peripherals>
</device>
"#;

    const BROKEN: &str = r#"<device>
  <name>BROKEN</name>
  <peripherals>
    <peripheral>
      <name>TIMER</name>
      <baseAddress>0x40054000</baseAddress>
      <registers>
        <register>
          <name>ALARM0</name>
          <addressOffset>0x10</addressOffset>
          <fields>
            <field>
              <name>VALUE</name>
              <bitOffset>0</bitOffset>
              <bitWidth>32</bitWidth>
            </field>
          </fields>
        </register>
        <register>
          <name>PAUSE</name>
          <addressOffset>0x30</addressOffset>
        </register>
      </registers>
    </peripheral>
  </peripherals>
</device>
"#;

    fn names<T>(items: &[T], name: impl Fn(&T) -> &str) -> Vec<&str> {
        items.iter().map(name).collect()
    }

    #[test]
    fn test_generate() {
        let device = registers_svd::parse_str(DEVICE).unwrap();
        let files =
            generate_from_device(&device, &FilterConfig::new(), &RenderOptions::default())
                .unwrap();
        assert_eq!(
            names(&files, |f| f.file_name.as_str()),
            ["uart0.rs", "sio.rs", "io_bank0.rs"]
        );
        assert_eq!(files[0].peripheral, "UART0");

        let uart = &files[0].code;
        println!("{uart}");
        assert!(uart.starts_with("//! UART0 registers.\n//!\n//! UART block\n"));
        assert!(uart.contains("pub const UART0_ADDR: u32 = 0x4003_4000;"));
        assert!(uart.contains("    pub const UARTCR_ADDR: u32 = 0x4003_4030;"));
        assert!(uart.contains("    pub const UARTCR_RESET: u32 = 0x12;"));
        assert!(uart.contains("    pub const UARTCR_XOR_ADDR: u32 = 0x4003_5030;"));
        assert!(uart.contains("    pub const UARTCR_SET_ADDR: u32 = 0x4003_6030;"));
        assert!(uart.contains("    pub const UARTCR_CLR_ADDR: u32 = 0x4003_7030;"));
        assert!(uart.contains(
            "            Mode OFFSET(1) NUMBITS(4) [\n                Idle = 0,\n                Run = 9,\n            ],\n"
        ));
        assert!(uart.contains(
            "            (0x18 => pub uartfr: tock_registers::registers::ReadOnly<u32, super::bits::Uartfr::Register>),"
        ));
        assert!(uart.contains(
            "            (0x44 => pub uarticr: tock_registers::registers::WriteOnly<u32, super::bits::Uarticr::Register>),\n            (0x48 => @END),"
        ));
    }

    #[test]
    fn test_derived_model() {
        let device = registers_svd::parse_str(DEVICE).unwrap();
        let uart = derive_peripheral(&device.peripherals[0]).unwrap();

        let uartcr = &uart.registers[0];
        assert_eq!(uartcr.access_type, AccessType::ReadWrite);
        assert_eq!(uartcr.fields[1].value_on_reset, 0b1001);
        assert_eq!(uartcr.fields[1].enum_values[1].value, 9);
        assert_eq!(uartcr.fields[1].enum_values[1].description, "Running");
        assert_eq!(uartcr.fields[1].enum_values[0].description, "");

        let uartfr = &uart.registers[1];
        assert_eq!(uartfr.access_type, AccessType::ReadOnly);
        assert_eq!(uartfr.fields[0].value_on_reset, 0);
        assert_eq!(uartfr.fields[1].value_on_reset, 1);

        let uarticr = &uart.registers[2];
        assert_eq!(uarticr.fields[0].access_type, AccessType::WriteClear);
        assert_eq!(uarticr.access_type, AccessType::WriteOnly);
        assert_eq!(uarticr.fields[0].enum_values.len(), 1);

        assert_eq!(
            uartcr.to_string(),
            "UARTCR @ 0x40034030 = 0x00000012 (read-write) ATOMIC\n        UARTEN [0:0] = 0b0 (read-write)\n            ZERO = 0\n            ONE = 1\n        MODE [4:1] = 0b1001 (read-write)\n            IDLE = 0\n            RUN = 9"
        );
    }

    #[test]
    fn test_read_only_single_bit_gets_zero_one() {
        // Read-only 1-bit fields are not excluded from ZERO/ONE synthesis;
        // the generated bitfields carry both values.
        let device = registers_svd::parse_str(DEVICE).unwrap();
        let uart = derive_peripheral(&device.peripherals[0]).unwrap();
        let busy = &uart.registers[1].fields[0];
        assert_eq!(busy.access_type, AccessType::ReadOnly);
        assert_eq!(
            names(&busy.enum_values, |e| e.name.as_str()),
            ["ZERO", "ONE"]
        );
    }

    #[test]
    fn test_single_cycle_io() {
        let device = registers_svd::parse_str(DEVICE).unwrap();
        let peripherals = derive_peripherals(&device, &FilterConfig::new()).unwrap();
        for peripheral in &peripherals {
            for register in &peripheral.registers {
                assert_eq!(
                    register.supports_atomic_bit_operations,
                    peripheral.name != "SIO",
                    "{}.{}",
                    peripheral.name,
                    register.name
                );
            }
        }

        let files = generate_from_device(
            &device,
            &FilterConfig::new().include_peripheral("sio"),
            &RenderOptions::default(),
        )
        .unwrap();
        let sio = &files[0].code;
        assert!(sio.contains("    pub const CPUID_ADDR: u32 = 0xd000_0000;"));
        assert!(!sio.contains("CPUID_XOR_ADDR"));
        // A lone full-width field without values needs no bitfield type.
        assert!(!sio.contains("pub mod bits"));
        assert!(sio.contains(
            "            (0x0 => pub cpuid: tock_registers::registers::ReadOnly<u32>),"
        ));
    }

    #[test]
    fn test_idempotent() {
        let device = registers_svd::parse_str(DEVICE).unwrap();
        for raw in &device.peripherals {
            assert_eq!(
                derive_peripheral(raw).unwrap(),
                derive_peripheral(raw).unwrap()
            );
        }
        let options = RenderOptions::default();
        assert_eq!(
            generate_from_device(&device, &FilterConfig::new(), &options).unwrap(),
            generate_from_device(&device, &FilterConfig::new(), &options).unwrap()
        );
    }

    #[test]
    fn test_filter_keeps_declaration_order() {
        let device = registers_svd::parse_str(DEVICE).unwrap();
        let filter: FilterConfig = ["io_bank0", "uart0"].into_iter().collect();
        let peripherals = derive_peripherals(&device, &filter).unwrap();
        assert_eq!(names(&peripherals, |p| p.name.as_str()), ["UART0", "IO_BANK0"]);

        // Unknown names select nothing and are not an error.
        let filter = FilterConfig::new().include_peripheral("uart7");
        assert!(derive_peripherals(&device, &filter).unwrap().is_empty());
    }

    #[test]
    fn test_render_options() {
        let device = registers_svd::parse_str(DEVICE).unwrap();
        let filter = FilterConfig::new().include_peripheral("IO_BANK0");
        let options = RenderOptions {
            namespace: Some("rp2040".into()),
            minify: false,
        };
        let pretty = generate_from_device(&device, &filter, &options).unwrap();
        assert!(pretty[0]
            .code
            .contains("pub mod rp2040 {\n    pub const IO_BANK0_ADDR: u32 = 0x4001_4000;\n"));

        let options = RenderOptions {
            minify: true,
            ..options
        };
        let minified = generate_from_device(&device, &filter, &options).unwrap();
        assert!(!minified[0].code.contains("//"));
        assert!(minified[0]
            .code
            .contains("pub mod rp2040 {\npub const IO_BANK0_ADDR: u32 = 0x4001_4000;\n"));
        assert!(minified[0].code.contains("\nFuncsel OFFSET(0) NUMBITS(5) [],\n"));
    }

    #[test]
    fn test_output_file_names_do_not_derive() {
        // TIMER cannot be derived, but listing its file name still works.
        let device = registers_svd::parse_str(BROKEN).unwrap();
        assert_eq!(
            output_file_names(&device, &FilterConfig::new()),
            ["timer.rs"]
        );
        assert!(output_file_names(&device, &FilterConfig::new().include_peripheral("sio"))
            .is_empty());
    }

    #[test]
    fn test_error_names_offending_entity() {
        let device = registers_svd::parse_str(BROKEN).unwrap();
        let err = generate_from_device(&device, &FilterConfig::new(), &RenderOptions::default())
            .unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("peripheral `TIMER`"), "{message}");
        assert!(message.contains("register `PAUSE`"), "{message}");
        assert_eq!(
            err.root_cause().downcast_ref::<DeriveError>(),
            Some(&DeriveError::EmptyFieldSet)
        );
    }

    #[test]
    fn test_malformed_literal_in_svd() {
        let svd = DEVICE.replace("<value>0b10x1</value>", "<value>0b10z1</value>");
        let device = registers_svd::parse_str(&svd).unwrap();
        let err = derive_peripherals(&device, &FilterConfig::new()).unwrap_err();
        let message = format!("{err:#}");
        assert!(
            message.contains("peripheral `UART0`: register `UARTCR`: field `MODE`"),
            "{message}"
        );
        assert_eq!(
            err.root_cause().downcast_ref::<DeriveError>(),
            Some(&DeriveError::MalformedLiteral("0b10z1".into()))
        );
    }

    #[test]
    fn test_generate_from_missing_file() {
        let err = generate_from_file(
            Path::new("does/not/exist.svd"),
            &FilterConfig::new(),
            &RenderOptions::default(),
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("does/not/exist.svd"));
    }
}
